pub mod app;
pub mod closure_js;
