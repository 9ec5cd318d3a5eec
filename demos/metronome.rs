//! Metronome: schedule beats in sample time and play them from another thread
//!
//! Run with: cargo run --example metronome
//!
//! The clock counts samples; virtual time counts beats. A "player" thread
//! stands in for an audio callback and prints every cue it receives.

use std::thread::{sleep, spawn};
use std::time::Duration;

use takt::{clock, emit, fork, repeat, track, wait, Conductor, Event, Flow};

const SAMPLE_RATE: f64 = 48_000.0;
const BLOCK: f64 = 512.0;

#[derive(Clone, Debug)]
enum Cue {
    Accent,
    Beat,
    Light(u8),
}

fn bar() -> Flow<(), Cue> {
    let clicks = track(vec![
        emit(vec![Cue::Accent]),
        wait(1.0),
        repeat(3, track(vec![emit(vec![Cue::Beat]), wait(1.0)])),
    ]);
    let lights = repeat(8, track(vec![emit(vec![Cue::Light(255)]), wait(0.25), emit(vec![Cue::Light(0)]), wait(0.25)]));
    fork(vec![clicks, lights])
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let bpm = 120.0;
    let beats_per_sample = bpm / 60.0 / SAMPLE_RATE;

    let (mut producer, mut consumer) = rtrb::RingBuffer::<Event<Cue>>::new(256);
    let mut conductor = Conductor::new(repeat(2, bar()), clock(beats_per_sample, BLOCK, 0.0))
        .with_lookahead(4.0 * BLOCK);

    let player = spawn(move || {
        let mut played = 0;
        loop {
            match consumer.pop() {
                Ok((sample, cue)) => {
                    println!("{:>8.0}  {:>6.2}s  {:?}", sample, sample / SAMPLE_RATE, cue);
                    played += 1;
                }
                Err(_) if consumer.is_abandoned() => break played,
                Err(_) => sleep(Duration::from_millis(1)),
            }
        }
    });

    while !conductor.is_finished() {
        conductor.render((), &mut producer);
        // halfway through, speed up to 180 bpm
        if conductor.now_rel() >= 4.0 && conductor.clock().rate < 180.0 / 60.0 / SAMPLE_RATE {
            conductor.set_rate(180.0 / 60.0 / SAMPLE_RATE);
        }
    }

    let dispatched = conductor.dispatched();
    drop(producer);
    let played = player.join().unwrap_or(0);
    println!("dispatched {}, played {}, dropped {}", dispatched, played, conductor.dropped());
}
