mod app;
mod catalog;
mod config;
mod lang;
mod player;
mod prefs;
mod quiz;
mod runtime;
mod screens;
mod storage;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
