// src/progress.rs
/// Status callbacks for multi-page runs (`scrape::collect_*`).
/// The CLI prints them; library callers may pass `None` or `NullProgress`.
pub trait Progress {
    /// Number of pages about to be fetched.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    fn item_done(&mut self, _url: &str) {}

    /// One page failed; the run continues.
    fn item_failed(&mut self, _url: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

pub struct NullProgress;
impl Progress for NullProgress {}
