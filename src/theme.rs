use crate::observer::{Observable, Subscription};

/// Dark/light switch shared by every themed widget.
#[derive(Debug, Clone, Default)]
pub struct ThemeStore {
    dark: Observable<bool>,
}

impl ThemeStore {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Observable::new(dark),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark.get()
    }

    pub fn set_dark(&self, dark: bool) -> bool {
        let changed = self.dark.set(dark);
        if changed {
            log::debug!("Theme changed to {}", if dark { "dark" } else { "light" });
        }
        changed
    }

    /// What the theme toggle button does.
    pub fn toggle(&self) -> bool {
        let dark = !self.is_dark();
        self.set_dark(dark);
        dark
    }

    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) -> Subscription {
        self.dark.subscribe(move |dark: &bool| listener(*dark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn starts_light_by_default() {
        assert!(!ThemeStore::default().is_dark());
    }

    #[test]
    fn toggle_flips_and_notifies() {
        let store = ThemeStore::default();
        let last = Rc::new(Cell::new(None));
        let sink = last.clone();
        let _sub = store.subscribe(move |dark| sink.set(Some(dark)));

        assert!(store.toggle());
        assert_eq!(last.get(), Some(true));
        assert!(!store.toggle());
        assert_eq!(last.get(), Some(false));
    }

    #[test]
    fn setting_current_value_is_silent() {
        let store = ThemeStore::new(true);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let _sub = store.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(!store.set_dark(true));
        assert_eq!(calls.get(), 0);
    }
}
