#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use maze_forager_core::{BoardLayout, Cell};
use serde::{Deserialize, Serialize};

const TRANSFER_DOMAIN: &str = "forage";
const TRANSFER_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded scenario payload.
pub(crate) const TRANSFER_HEADER: &str = "forage:v1";
/// Delimiter used to separate the prefix, board dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Complete description of a board the host can simulate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Scenario {
    /// Number of board columns.
    pub width: u32,
    /// Number of board rows.
    pub height: u32,
    /// Cell the agent starts on.
    pub agent: Cell,
    /// Cells that can never be traversed.
    pub obstacles: Vec<Cell>,
    /// Collectible items present at session start.
    pub collectibles: Vec<Cell>,
    /// Power items present at session start.
    pub power_items: Vec<Cell>,
    /// Hazard starting cells.
    pub hazards: Vec<Cell>,
}

impl Scenario {
    /// Derives the session-start layout handed to the planner.
    pub(crate) fn layout(&self) -> BoardLayout {
        BoardLayout {
            corners: vec![
                Cell::new(0, 0),
                Cell::new(self.width - 1, 0),
                Cell::new(0, self.height - 1),
                Cell::new(self.width - 1, self.height - 1),
            ],
            obstacles: self.obstacles.clone(),
        }
    }

    /// Encodes the scenario into a single-line string suitable for
    /// clipboard transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = TransferPayload {
            agent: self.agent,
            obstacles: self.obstacles.clone(),
            collectibles: self.collectibles.clone(),
            power_items: self.power_items.clone(),
            hazards: self.hazards.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("scenario serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{TRANSFER_HEADER}:{}x{}:{encoded}", self.width, self.height)
    }

    /// Decodes a scenario from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, ScenarioTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ScenarioTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ScenarioTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(ScenarioTransferError::MissingVersion)?;
        let dimensions = parts
            .next()
            .ok_or(ScenarioTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(ScenarioTransferError::MissingPayload)?;

        if domain != TRANSFER_DOMAIN {
            return Err(ScenarioTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != TRANSFER_VERSION {
            return Err(ScenarioTransferError::UnsupportedVersion(
                version.to_owned(),
            ));
        }

        let (width, height) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ScenarioTransferError::InvalidEncoding)?;
        let decoded: TransferPayload =
            serde_json::from_slice(&bytes).map_err(ScenarioTransferError::InvalidPayload)?;

        Ok(Self {
            width,
            height,
            agent: decoded.agent,
            obstacles: decoded.obstacles,
            collectibles: decoded.collectibles,
            power_items: decoded.power_items,
            hazards: decoded.hazards,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct TransferPayload {
    agent: Cell,
    obstacles: Vec<Cell>,
    collectibles: Vec<Cell>,
    power_items: Vec<Cell>,
    hazards: Vec<Cell>,
}

/// Resolves a built-in scenario by name.
pub(crate) fn builtin(name: &str) -> Option<Scenario> {
    match name {
        "training" => Some(training_yard()),
        "crossing" => Some(hazard_crossing()),
        _ => None,
    }
}

/// Open 5x5 board with a single collectible in the far corner.
fn training_yard() -> Scenario {
    Scenario {
        width: 5,
        height: 5,
        agent: Cell::new(0, 0),
        obstacles: Vec::new(),
        collectibles: vec![Cell::new(4, 4)],
        power_items: Vec::new(),
        hazards: Vec::new(),
    }
}

/// 9x9 board split by a partial wall, patrolled by two hazards.
fn hazard_crossing() -> Scenario {
    Scenario {
        width: 9,
        height: 9,
        agent: Cell::new(0, 0),
        obstacles: vec![
            Cell::new(4, 2),
            Cell::new(4, 3),
            Cell::new(4, 4),
            Cell::new(4, 5),
        ],
        collectibles: vec![
            Cell::new(8, 0),
            Cell::new(8, 8),
            Cell::new(0, 8),
            Cell::new(6, 2),
            Cell::new(2, 6),
        ],
        power_items: vec![Cell::new(0, 4)],
        hazards: vec![Cell::new(8, 4), Cell::new(4, 8)],
    }
}

fn parse_dimensions(value: &str) -> Result<(u32, u32), ScenarioTransferError> {
    let invalid = || ScenarioTransferError::InvalidDimensions(value.to_owned());

    let (width, height) = value.split_once('x').ok_or_else(invalid)?;
    let width: u32 = width.parse().map_err(|_| invalid())?;
    let height: u32 = height.parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }

    Ok((width, height))
}

/// Errors that can occur while decoding scenario transfer strings.
#[derive(Debug)]
pub(crate) enum ScenarioTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded scenario.
    MissingPrefix,
    /// The encoded scenario did not contain a version segment.
    MissingVersion,
    /// The encoded scenario did not include board dimensions.
    MissingDimensions,
    /// The encoded scenario did not include the payload segment.
    MissingPayload,
    /// The encoded scenario used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded scenario used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The board dimensions could not be parsed from the encoded scenario.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for ScenarioTransferError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(formatter, "transfer string is empty"),
            Self::MissingPrefix => write!(formatter, "transfer string is missing its prefix"),
            Self::MissingVersion => write!(formatter, "transfer string is missing its version"),
            Self::MissingDimensions => {
                write!(formatter, "transfer string is missing board dimensions")
            }
            Self::MissingPayload => write!(formatter, "transfer string is missing its payload"),
            Self::InvalidPrefix(prefix) => {
                write!(formatter, "unexpected transfer prefix `{prefix}`")
            }
            Self::UnsupportedVersion(version) => {
                write!(formatter, "unsupported transfer version `{version}`")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(formatter, "invalid board dimensions `{dimensions}`")
            }
            Self::InvalidEncoding(error) => {
                write!(formatter, "payload is not valid base64: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(formatter, "payload is not a valid scenario: {error}")
            }
        }
    }
}

impl Error for ScenarioTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}
