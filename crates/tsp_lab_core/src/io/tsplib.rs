use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{Error, Instance, Point, Result};

const SECTION_TERMINATORS: [&str; 3] = ["EOF", "DISPLAY_DATA_SECTION", "EDGE_WEIGHT_SECTION"];

/// Parse a TSPLIB-style `NODE_COORD_SECTION` file into an [`Instance`].
///
/// Only `EUC_2D` instances are accepted; the distance oracle supports
/// symmetric planar Euclidean cost and nothing else.
pub fn parse_tsp_file(path: impl AsRef<Path>) -> Result<Instance> {
    let path = path.as_ref();
    log::debug!("tsplib: reading {}", path.display());
    let file = File::open(path)?;
    parse_tsp_reader(BufReader::new(file))
}

pub fn parse_tsp_reader(reader: impl BufRead) -> Result<Instance> {
    let mut name = String::new();
    let mut dimension = 0usize;
    let mut edge_weight_type = String::from("EUC_2D");
    let mut coordinates: Vec<Point> = Vec::new();
    let mut reading_coordinates = false;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.starts_with("NAME") {
            name = header_value(line);
        } else if line.starts_with("DIMENSION") {
            let raw = header_value(line);
            dimension = raw
                .parse()
                .map_err(|_| Error::invalid_data(format!("bad DIMENSION: {raw}")))?;
        } else if line.starts_with("EDGE_WEIGHT_TYPE") {
            edge_weight_type = header_value(line);
        } else if line == "NODE_COORD_SECTION" {
            reading_coordinates = true;
        } else if SECTION_TERMINATORS.contains(&line) {
            break;
        } else if reading_coordinates && !line.is_empty() {
            let mut parts = line.split_whitespace();
            let _index = parts.next();
            let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
                return Err(Error::invalid_data(format!("bad coordinate line: {line}")));
            };
            let x: f64 = x
                .parse()
                .map_err(|_| Error::invalid_data(format!("bad x coordinate: {x}")))?;
            let y: f64 = y
                .parse()
                .map_err(|_| Error::invalid_data(format!("bad y coordinate: {y}")))?;
            let point = Point::new(x, y);
            if !point.is_valid() {
                return Err(Error::invalid_data(format!("non-finite coordinate: {line}")));
            }
            coordinates.push(point);
        }
    }

    if edge_weight_type != "EUC_2D" {
        return Err(Error::invalid_data(format!(
            "unsupported EDGE_WEIGHT_TYPE: {edge_weight_type} (only EUC_2D)"
        )));
    }
    if coordinates.is_empty() {
        return Err(Error::invalid_data("no coordinates found"));
    }
    if dimension != 0 && dimension != coordinates.len() {
        log::warn!(
            "tsplib: DIMENSION={dimension} but {} coordinates read, using coordinate count",
            coordinates.len()
        );
    }

    Ok(Instance::new(name, coordinates))
}

fn header_value(line: &str) -> String {
    match line.split_once(':') {
        Some((_, value)) => value.trim().to_string(),
        None => String::new(),
    }
}
