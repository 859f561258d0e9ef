//! Simulated player turn: feeds synthetic frames until the debounce machine
//! confirms an answer, printing hold progress along the way.

use image::{Rgb, RgbImage};
use signvote::{HoldStatus, SignDetector};
use std::time::{Duration, Instant};

/// Synthetic 640x480 frame with a green sign in the default ROI.
fn synthetic_frame() -> RgbImage {
    let mut frame = RgbImage::from_pixel(640, 480, Rgb([12, 12, 12]));
    for y in 40..180 {
        for x in 60..240 {
            frame.put_pixel(x, y, Rgb([30, 200, 30]));
        }
    }
    frame
}

fn main() {
    let detector = SignDetector::new();
    let frame = synthetic_frame();

    let mut turn = detector.new_turn();
    let t0 = Instant::now();
    let frame_interval = Duration::from_nanos(33_333_333); // 30 fps

    for n in 0.. {
        let now = t0 + frame_interval * n;
        let report = detector.process_frame_at(now, &frame, 4, &mut turn);

        match report.status {
            HoldStatus::Tracking {
                candidate,
                progress,
            } => println!("frame {n:3}: holding candidate {candidate} ({:3.0}%)", progress * 100.0),
            HoldStatus::Idle => println!("frame {n:3}: no sign"),
            HoldStatus::Confirmed { candidate } => {
                let name = &detector.config().colors.palette[candidate].name;
                println!("frame {n:3}: confirmed {name} (index {candidate})");
                break;
            }
        }
    }
}
