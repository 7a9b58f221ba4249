pub mod registry;
pub mod translate;
pub mod webhook;
