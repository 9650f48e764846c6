//! Write access to state that lives in a component signal.
//!
//! The async flows in [`crate::login`] and [`crate::admin`] only need to
//! mutate their state between awaits. Taking a [`StateCell`] instead of a
//! `Signal` lets the same flow run against a plain value in tests, and keeps
//! every write guard scoped to a single closure so none is held across an
//! `.await`.

use dioxus::prelude::*;

use crate::admin::AdminState;
use crate::login::LoginForm;
use crate::user_form::UserForm;

pub trait StateCell<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T: 'static> StateCell<T> for Signal<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.write())
    }
}

macro_rules! owned_state_cell {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StateCell<$ty> for $ty {
                fn update<R>(&mut self, f: impl FnOnce(&mut $ty) -> R) -> R {
                    f(self)
                }
            }
        )*
    };
}

owned_state_cell!(AdminState, LoginForm, UserForm);
