use image::ImageReader;
use signvote::SignDetector;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <frame.png> <option_count> [config.json]", args[0]);
        std::process::exit(2);
    }

    let frame = ImageReader::open(&args[1])?.decode()?.to_rgb8();
    let option_count: usize = args[2].parse()?;

    let detector = match args.get(3) {
        Some(path) => SignDetector::from_json_file(Path::new(path))?,
        None => SignDetector::new(),
    };

    let mut turn = detector.new_turn();
    let report = detector.process_frame(&frame, option_count, &mut turn);

    match report.detection {
        Some(d) => {
            let name = &detector.config().colors.palette[d.index].name;
            println!("Detected {name} (index {}, score {}).", d.index, d.score);
        }
        None => println!("No sign detected."),
    }
    Ok(())
}
