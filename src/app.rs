mod model;

pub use model::{App, PlaybackState, Route, Screen};
