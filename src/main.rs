use linguaspark::{
    gui::LinguaApp,
    logging,
    persistence::JsonStore,
    Settings,
};
use tracing::{
    error,
    info,
};

fn main() -> eframe::Result {
    let _ = dotenvy::dotenv();
    logging::init_tracing(logging::DEFAULT_FILTER);

    let store = JsonStore::app_default();
    let settings = Settings::load(&store);
    info!(
        data_dir = %store.dir().display(),
        ai = settings.generation_configured(),
        drive = settings.drive_configured(),
        "starting LinguaSpark"
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("LinguaSpark")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LinguaSpark",
        options,
        Box::new(move |cc| match LinguaApp::new(cc, store, settings) {
            Ok(app) => Ok(Box::new(app)),
            Err(e) => {
                error!(error = %e, "failed to start");
                Err(e.into())
            }
        }),
    )
}
