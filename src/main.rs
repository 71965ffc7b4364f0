use milliner::{ConfigStore, FileStore, HatApp, HatConfig};

fn main() -> milliner::Result<()> {
    env_logger::init();

    let store = FileStore::new(FileStore::default_path());
    let config = match store.load() {
        Ok(Some(config)) => config,
        Ok(None) => HatConfig::default(),
        Err(e) => {
            log::warn!("ignoring saved configuration: {e}");
            HatConfig::default()
        }
    };

    HatApp::new(config).with_store(Box::new(store)).run()
}
