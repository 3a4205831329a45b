// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use radix_perf::config::PerfConfig;
use radix_perf::sort::{self, Strategy};
use radix_perf::{charts, generate, input};

use std::fs::File;
use std::path::Path;
use std::time::Duration;

fn dimensions(path: &Path) -> (u32, u32) {
    let decoder = png::Decoder::new(File::open(path).unwrap());
    let reader = decoder.read_info().unwrap();
    (reader.info().width, reader.info().height)
}

/// Decoded RGB pixels of a PNG, indexed as `pixels[y][x]`.
fn pixels(path: &Path) -> Vec<Vec<(u8, u8, u8)>> {
    let decoder = png::Decoder::new(File::open(path).unwrap());
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).unwrap();
    let samples = frame.color_type.samples();

    buf[..frame.buffer_size()]
        .chunks(frame.line_size)
        .map(|row| {
            row.chunks(samples)
                .take(frame.width as usize)
                .map(|p| (p[0], p[1], p[2]))
                .collect()
        })
        .collect()
}

#[test]
fn perf_chart_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("results.out.png");
    let output = output.to_str().unwrap();

    let config = PerfConfig::from_args(vec!["perf-chart", "--output", output]).unwrap();
    let chart = charts::perf_chart(&config).unwrap();
    chart.render(config.output()).unwrap();

    assert!(std::fs::metadata(output).unwrap().len() > 0);
    assert_eq!(dimensions(Path::new(output)), config.size());
}

#[test]
fn perf_chart_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("perf.toml");
    let output = dir.path().join("custom.png");
    std::fs::write(
        &file,
        format!(
            r##"
categories = [1000, 2000]

[general]
output = "{}"
width = 400
height = 300

[[series]]
name = "Serial"
colour = "r"
values = [0.5, 1.0]

[[series]]
name = "Parallel"
colour = "#00ff00"
values = [0.25, 0.4]

[[series]]
name = "Threads"
values = [0.2, 0.3]
"##,
            output.display()
        ),
    )
    .unwrap();

    let config = PerfConfig::from_args(vec!["perf-chart", "--config", file.to_str().unwrap()])
        .unwrap();
    assert_eq!(config.series().len(), 3);
    charts::perf_chart(&config)
        .unwrap()
        .render(config.output())
        .unwrap();
    assert_eq!(dimensions(&output), (400, 300));
}

#[test]
fn data_chart_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data.out.png");

    let data = input::read_plot_data("x\ny\n1 2 3\n".as_bytes()).unwrap();
    charts::data_chart(&data, (640, 480)).render(&output).unwrap();

    assert!(std::fs::metadata(&output).unwrap().len() > 0);
    assert_eq!(dimensions(&output), (640, 480));

    // axes hidden and values fitted tightly: the first bar starts in the
    // bottom-left corner and the last, tallest one touches the top edge
    let image = pixels(&output);
    let bar = image[479][0];
    assert_ne!(bar, (255, 255, 255));
    assert_eq!(image[0][639], bar);
    assert_eq!(image[0][0], (255, 255, 255));
}

#[test]
fn generate_sort_and_plot() {
    let mut generated = Vec::new();
    generate::generate(&mut generate::rng(Some(3)), 500, 100, &mut generated).unwrap();

    let mut values = input::read_sort_input(generated.as_slice()).unwrap();
    assert_eq!(values.len(), 500);

    let strategy = sort::execute(&mut values, 2, 4, 300).unwrap();
    assert_eq!(strategy, Strategy::Parallel);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));

    let mut report = Vec::new();
    sort::report(
        &mut report,
        strategy,
        Duration::from_millis(3),
        Some(values.as_slice()),
    )
    .unwrap();

    let plotted = input::read_plot_data(report.as_slice()).unwrap();
    let expected: Vec<i64> = values.iter().map(|&v| v as i64).collect();
    assert_eq!(plotted, expected);

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sorted.png");
    charts::data_chart(&plotted, (320, 240))
        .render(&output)
        .unwrap();
    assert_eq!(dimensions(&output), (320, 240));
}

#[test]
fn small_inputs_sort_serially() {
    let mut values = input::read_sort_input("5 50 40 30 20 10".as_bytes()).unwrap();
    let strategy = sort::execute(&mut values, 10, 4, 300).unwrap();
    assert_eq!(strategy, Strategy::Serial);
    assert_eq!(values, vec![10, 20, 30, 40, 50]);
}
