use hand_replay::config::PlaybackConfig;
use hand_replay::parse::load_frames_from_file;
use hand_replay::visualize::visualize_hands;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    ////////////////////////////// usage: replay <hand_poses.json> [config.json] ///////////////
    let args: Vec<String> = std::env::args().collect();
    let capture_path = args.get(1).map(String::as_str).unwrap_or("./tests/data/hand_poses.json");
    let config = match args.get(2) {
        Some(path) => PlaybackConfig::from_file(path)?,
        None => PlaybackConfig::default(),
    };

    let store = load_frames_from_file(capture_path, config.topology)?;
    visualize_hands(store, &config)?;
    Ok(())
}
