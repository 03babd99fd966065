//! Shared handle to a front matter record
//!
//! Editor components that hold the same document all see one record, so a
//! write through any handle is visible to every clone. The handle is
//! single-threaded; callers serialize their own access.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::front_matter::FrontMatter;
use crate::options::OutputOptions;

/// Reference-counted handle to a [`FrontMatter`] record
#[derive(Debug, Clone, Default)]
pub struct SharedFrontMatter(Rc<RefCell<FrontMatter>>);

impl SharedFrontMatter {
    /// Wrap a record in a shared handle
    pub fn new(front_matter: FrontMatter) -> Self {
        Self(Rc::new(RefCell::new(front_matter)))
    }

    /// Borrow the underlying record
    ///
    /// # Panics
    ///
    /// Panics if the record is currently borrowed mutably, which only happens
    /// inside [`SharedFrontMatter::update`].
    pub fn borrow(&self) -> Ref<'_, FrontMatter> {
        self.0.borrow()
    }

    /// Names of the configured output formats
    pub fn list_formats(&self) -> Vec<String> {
        self.0
            .borrow()
            .list_formats()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Get a copy of the options configured for `format`
    pub fn get_output_option(&self, format: &str) -> Option<OutputOptions> {
        self.0.borrow().get_output_option(format).cloned()
    }

    /// Set the options for `format`
    pub fn set_output_option(&self, format: impl Into<String>, options: OutputOptions) {
        self.0.borrow_mut().set_output_option(format, options);
    }

    /// Run `f` with mutable access to the record
    pub fn update<R>(&self, f: impl FnOnce(&mut FrontMatter) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Whether two handles refer to the same record
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Take the record back out, or clone it if other handles are still alive
    pub fn into_inner(self) -> FrontMatter {
        match Rc::try_unwrap(self.0) {
            Ok(cell) => cell.into_inner(),
            Err(shared) => shared.borrow().clone(),
        }
    }
}

impl From<FrontMatter> for SharedFrontMatter {
    fn from(front_matter: FrontMatter) -> Self {
        Self::new(front_matter)
    }
}
