#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod platform;

fn main() {
    if let Err(err) = platform::run_app() {
        eprintln!("crawlerx failed: {err}");
        std::process::exit(1);
    }
}
