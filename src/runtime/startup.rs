use std::path::Path;

use crate::app::App;
use crate::catalog;
use crate::config;
use crate::player::Player;
use crate::prefs;
use crate::storage::{StorageClient, Uploader};

/// Everything the event loop needs, wired together.
pub struct Services {
    pub app: App,
    pub player: Player,
    pub uploader: Uploader,
}

pub fn start(settings: &config::Settings) -> Result<Services, Box<dyn std::error::Error>> {
    let language = prefs::load_language();
    let catalog = catalog::builtin(Path::new(&settings.library.media_dir));

    // The player starts with an empty sequence; the first loop iteration
    // syncs it to whatever the mounted screen plays from.
    let player = Player::new(Vec::new());

    let client = StorageClient::new(&settings.storage)?;
    let uploader = Uploader::spawn(client);

    let mut app = App::new(catalog, language);
    app.set_playback_handle(player.playback_handle());

    tracing::info!(
        tracks = app.catalog.len(),
        language = app.language.as_deref().unwrap_or("-"),
        "started"
    );

    Ok(Services {
        app,
        player,
        uploader,
    })
}
