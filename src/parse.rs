use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use log::{debug, info};
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::store::FrameStore;
use crate::topology::Topology;
use crate::types::*;

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The shapes a per-hand record has taken across capture tool versions.
/// Resolved by looking at the record, never by trying one shape after another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandRecord<'a> {
    /// `hands[subject][take][joint][coord]`; holds the joint entries of subject 0, take 0.
    Nested(&'a [Value]),
    /// `[{ "joints": [{x,y,z}], "wrist_orientation": {x,y,z} }]`; holds the first hand object.
    Structured(&'a Map<String, Value>),
    /// Loosely shaped tree whose `[0][0][0]` should be a list of coordinate arrays.
    Generic(&'a Value),
    /// Nothing usable.
    Empty,
}

impl<'a> HandRecord<'a> {
    pub fn classify(value: &'a Value) -> HandRecord<'a> {
        let Some(first) = value.as_array().and_then(|subjects| subjects.first()) else {
            return HandRecord::Empty;
        };
        if let Some(hand) = first.as_object() {
            return HandRecord::Structured(hand);
        }
        let Some(take) = first.as_array().and_then(|takes| takes.first()) else {
            return HandRecord::Empty;
        };
        let Some(entries) = take.as_array() else {
            return HandRecord::Empty;
        };
        // one more level of arrays below the joint entries means the generic layout
        let deeper = entries
            .first()
            .and_then(|entry| entry.as_array())
            .and_then(|entry| entry.first())
            .is_some_and(|leaf| leaf.is_array());
        if deeper {
            HandRecord::Generic(value)
        } else {
            HandRecord::Nested(entries)
        }
    }

    /// Normalize into a [`HandFrame`]. Missing or malformed data gives an empty frame.
    pub fn to_hand_frame(&self) -> HandFrame {
        match *self {
            HandRecord::Nested(entries) => {
                // short or non-numeric joints are skipped, shrinking the list
                HandFrame::new(entries.iter().filter_map(__coord_array).collect())
            }
            HandRecord::Structured(hand) => {
                let joints: Vec<Position> = hand
                    .get("joints")
                    .and_then(Value::as_array)
                    .map(|joints| joints.iter().filter_map(__coord_object).collect())
                    .unwrap_or_default();
                HandFrame {
                    joints,
                    wrist_orientation: hand.get("wrist_orientation").and_then(__coord_object),
                }
            }
            HandRecord::Generic(root) => HandFrame::new(__walk_generic(root).unwrap_or_default()),
            HandRecord::Empty => HandFrame::default(),
        }
    }
}

/// `[x, y, z, ...]` with at least three numbers up front.
fn __coord_array(value: &Value) -> Option<Position> {
    match value.as_array()?.as_slice() {
        [x, y, z, ..] => Some(Position::new(x.as_f64()?, y.as_f64()?, z.as_f64()?)),
        _ => None,
    }
}

/// `{"x": .., "y": .., "z": ..}`
fn __coord_object(value: &Value) -> Option<Position> {
    let object = value.as_object()?;
    Some(Position::new(
        object.get("x")?.as_f64()?,
        object.get("y")?.as_f64()?,
        object.get("z")?.as_f64()?,
    ))
}

/// All-or-nothing: one bad coordinate entry drops the whole hand.
fn __walk_generic(root: &Value) -> Option<Vec<Position>> {
    root.get(0)?
        .get(0)?
        .get(0)?
        .as_array()?
        .iter()
        .map(__coord_array)
        .collect()
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parse one hand of a frame record. `None` when the record has no entry for `side`.
/// Joints beyond the topology are dropped.
pub fn parse_hand(record: &Value, side: HandSide, topology: Topology) -> Option<HandFrame> {
    let value = side
        .record_keys()
        .iter()
        .find_map(|key| record.get(key))
        .filter(|value| !value.is_null())?;

    let mut hand = HandRecord::classify(value).to_hand_frame();
    if hand.joints.len() > topology.joint_count() {
        debug!(
            "{} hand carries {} joints, keeping the first {}",
            side.as_str(),
            hand.joints.len(),
            topology.joint_count()
        );
        hand.joints.truncate(topology.joint_count());
    }
    Some(hand)
}

/// Parse a whole frame record. Non-object records yield a frame without hands.
pub fn parse_frame(record: &Value, topology: Topology) -> CaptureFrame {
    let mut frame = CaptureFrame::default();
    if !record.is_object() {
        return frame;
    }
    for side in HandSide::BOTH {
        *frame.hand_mut(side) = parse_hand(record, side, topology);
    }
    frame
}

fn __frame_index_regex() -> Result<&'static Regex> {
    static RE_FRAME_INDEX: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    RE_FRAME_INDEX
        .get_or_init(|| Regex::new(r"^[0-9]+$"))
        .as_ref()
        .map_err(|err| Error::FrameKeyPattern(err.clone()))
}

/// Frame keys are plain base-10 digits; `+1`, `-1`, ` 1` and `1.0` are all rejected.
pub fn parse_frame_index(key: &str) -> Result<FrameIndex> {
    let re = __frame_index_regex()?;

    let invalid = || Error::InvalidFrameIndex {
        key: key.to_string(),
    };
    if !re.is_match(key) {
        return Err(invalid());
    }
    key.parse::<FrameIndex>().map_err(|_| invalid())
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn parse_frames(root: &Value, topology: Topology) -> Result<FrameStore> {
    let records = root.as_object().ok_or(Error::NotAnObject)?;

    let mut frames: BTreeMap<FrameIndex, CaptureFrame> = BTreeMap::new();
    for (key, record) in records {
        let index = parse_frame_index(key)?;
        if frames.insert(index, parse_frame(record, topology)).is_some() {
            return Err(Error::DuplicateFrameIndex { index });
        }
    }

    let store = FrameStore::new(frames, topology);
    match (store.first_index(), store.last_index()) {
        (Some(first), Some(last)) => info!(
            "loaded {} frames ({}..={}) with {:?} topology",
            store.len(),
            first,
            last,
            topology
        ),
        _ => info!("loaded an empty capture"),
    }
    Ok(store)
}

//////////////////////////////////////////////////////////////// PUBLIC ///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// load a capture from a file path
pub fn load_frames_from_file(file_path: impl AsRef<Path>, topology: Topology) -> Result<FrameStore> {
    let path = file_path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_frames_from_string(&contents, topology)
}

/// load a capture from a string
pub fn load_frames_from_string(json: &str, topology: Topology) -> Result<FrameStore> {
    let root: Value = serde_json::from_str(json)?;
    parse_frames(&root, topology)
}

/// load a capture from any reader
pub fn load_frames_from_reader(reader: impl Read, topology: Topology) -> Result<FrameStore> {
    let root: Value = serde_json::from_reader(reader)?;
    parse_frames(&root, topology)
}

/// build a store from an already deserialized capture
pub fn load_frames_from_value(root: &Value, topology: Topology) -> Result<FrameStore> {
    parse_frames(root, topology)
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
