use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::view::{ElementId, LOADING_LABEL, View};

/// Marks a control busy for as long as the guard lives.
///
/// Acquiring disables the control and shows the loading label; dropping
/// re-enables it and puts the resting label back, whichever way the
/// command finished.
pub struct BusyGuard<'a> {
    view: &'a dyn View,
    busy: &'a RefCell<BTreeSet<ElementId>>,
    control: ElementId,
}

impl<'a> BusyGuard<'a> {
    /// `None` if the control is already busy.
    pub fn acquire(
        view: &'a dyn View,
        busy: &'a RefCell<BTreeSet<ElementId>>,
        control: ElementId,
    ) -> Option<Self> {
        if !busy.borrow_mut().insert(control) {
            return None;
        }
        view.set_disabled(control, true);
        view.set_label(control, LOADING_LABEL);
        Some(Self {
            view,
            busy,
            control,
        })
    }

    pub fn control(&self) -> ElementId {
        self.control
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.borrow_mut().remove(&self.control);
        self.view.set_disabled(self.control, false);
        self.view
            .set_label(self.control, self.control.label().unwrap_or("Action"));
    }
}
