pub mod presenter;
pub mod tui;

pub use presenter::{Form, Presenter, PresenterError, Session, Trend, TrendView};
