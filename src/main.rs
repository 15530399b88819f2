use quadrangle::{CampusApp, ComposerConfig};

/// Optional single argument pins the scene to an hour, e.g. `quadrangle 8`.
fn main() {
    env_logger::init();

    let fixed_hour = std::env::args().nth(1).and_then(|arg| arg.parse().ok());

    let app = CampusApp::new(ComposerConfig {
        fixed_hour,
        ..ComposerConfig::default()
    });
    app.run();
}
