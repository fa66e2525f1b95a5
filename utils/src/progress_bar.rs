/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

const BAR_LENGTH: usize = 50;

/// Shows something like `[=====          ] 33%` in the console. It
/// can be ticked from several threads.
pub struct ProgressBar {
    last_progress: AtomicUsize,
    counter: AtomicUsize,
    total_count: usize,
    start: Instant,
}

impl ProgressBar {
    /// Creates a new progress bar for `total_count` tasks and
    /// prints it
    pub fn new(total_count: usize) -> Self {
        let ret = Self {
            total_count,
            last_progress: AtomicUsize::new(0),
            counter: AtomicUsize::new(0),
            start: Instant::now(),
        };
        ret.show_progress(0);
        ret
    }

    /// Registers that a task was finished
    pub fn tic(&self) {
        let c = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let progress = self.progress_of(c);
        let lp = self.last_progress.load(Ordering::Relaxed);
        let delta = progress.saturating_sub(lp);
        if delta >= 100 / BAR_LENGTH {
            self.last_progress.fetch_add(delta, Ordering::Relaxed);
            self.show_progress(progress);
        }
    }

    /// Number of tasks finished so far
    pub fn count(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }

    /// Percentage of tasks finished after `c` tics
    fn progress_of(&self, c: usize) -> usize {
        if self.total_count == 0 {
            return 100;
        }
        let p = (100. * (c as f32) / self.total_count as f32).round() as usize;
        p.min(100)
    }

    fn show_progress(&self, progress: usize) {
        let filled_length = (BAR_LENGTH as f64 * (progress as f64 / 100.0)).round() as usize;
        let filled = "=".repeat(filled_length);
        let empty = " ".repeat(BAR_LENGTH - filled_length);
        print!("\r[{}{}] {}%", filled, empty, progress);
        // Nothing to do if stdout is gone
        let _ = std::io::stdout().flush();
    }

    /// Closes the bar, reporting the elapsed time
    pub fn done(&self) {
        println!(
            "\nProcess done after {} seconds",
            self.start.elapsed().as_secs()
        );
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_progress() {
        let bar = ProgressBar::new(4);
        assert_eq!(bar.progress_of(0), 0);
        assert_eq!(bar.progress_of(1), 25);
        assert_eq!(bar.progress_of(4), 100);
        assert_eq!(bar.progress_of(9), 100);

        bar.tic();
        bar.tic();
        assert_eq!(bar.count(), 2);
        bar.done();
    }

    #[test]
    fn test_empty() {
        let bar = ProgressBar::new(0);
        assert_eq!(bar.progress_of(0), 100);
    }
}
