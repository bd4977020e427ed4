// HTTP middleware shared by all routes

pub mod panic;

pub use panic::handle_panic;
