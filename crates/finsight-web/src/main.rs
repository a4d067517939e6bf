mod api;
mod app;
mod classes;
mod components;
mod config;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
