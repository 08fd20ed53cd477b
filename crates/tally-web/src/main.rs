mod app;
mod listeners;
mod platform;

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(app::App);
}
