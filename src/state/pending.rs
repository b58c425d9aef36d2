//! Work owned by a screen that has to stop when the screen goes away

/// Holds the cancel hook of the screen's in-flight submission
#[derive(Default)]
pub struct PendingTask {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl PendingTask {
    /// Track new work; anything still tracked is cancelled first
    pub fn track(&mut self, cancel: impl FnOnce() + 'static) {
        self.cancel();
        self.cancel = Some(Box::new(cancel));
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.cancel.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let hook = {
            let count = count.clone();
            move || count.set(count.get() + 1)
        };
        (count, hook)
    }

    #[test]
    fn test_cancel_runs_hook_once() {
        let (cancelled, hook) = counter();
        let mut pending = PendingTask::default();
        pending.track(hook);
        assert!(pending.is_pending());

        pending.cancel();
        pending.cancel();

        assert_eq!(cancelled.get(), 1);
        assert!(!pending.is_pending());
    }

    #[test]
    fn test_track_cancels_previous() {
        let (first, first_hook) = counter();
        let (second, second_hook) = counter();
        let mut pending = PendingTask::default();

        pending.track(first_hook);
        pending.track(second_hook);

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
        assert!(pending.is_pending());
    }

    #[test]
    fn test_cancel_without_work_is_noop() {
        let mut pending = PendingTask::default();
        pending.cancel();
        assert!(!pending.is_pending());
    }
}
