use std::rc::Rc;

/// Switches the visible page. Implemented by the application context.
pub trait Navigator {
    fn navigate(&self, page: &str);
}

/// Where a create form goes after it succeeds or is cancelled
#[derive(Clone)]
pub struct NavigationEffect {
    navigator: Rc<dyn Navigator>,
    list_page: &'static str,
}

impl NavigationEffect {
    pub fn new(navigator: Rc<dyn Navigator>, list_page: &'static str) -> Self {
        Self {
            navigator,
            list_page,
        }
    }

    pub fn list_page(&self) -> &'static str {
        self.list_page
    }

    /// Called once the created record has been cleared from the form
    pub fn after_create(&self) {
        log::debug!("navigating to {} after create", self.list_page);
        self.navigator.navigate(self.list_page);
    }

    /// User-initiated abort: navigation only, form state is left untouched
    pub fn cancel(&self) {
        log::debug!("create cancelled, navigating to {}", self.list_page);
        self.navigator.navigate(self.list_page);
    }
}
