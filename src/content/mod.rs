//! Static content graph — ordered tracks of protocol cards.
//!
//! Pure read-only data: the topology the progression and dialogue engines
//! operate over. Ordering is significant — a card's successor is the next
//! card in the same track, and the last card of the first track is the
//! "setup-completion" card that gates every other track.

mod catalog;

use serde::{Deserialize, Serialize};

/// A single unit of content — the unit of unlocking and completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Unique, stable identifier. Doubles as the lookup key into the
    /// dialogue script table (matched by substring).
    pub id: String,
    /// Short title shown on the card face.
    pub card_title: String,
    /// Subtitle shown under the title.
    pub card_subtitle: String,
    /// Full name of the technique this protocol teaches.
    pub technique_title: String,
    /// One-paragraph description of the technique.
    pub technique_description: String,
    /// The scripted command that opens this card's dialogue.
    pub activation_command: String,
}

/// An ordered group of cards representing one thematic stage of the program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Presentation hint — accent color for the track.
    pub color_tag: String,
    pub description: String,
    pub cards: Vec<Card>,
}

impl Track {
    /// First card of this track, unlocked when the track activates.
    pub fn first_card(&self) -> &Card {
        &self.cards[0]
    }
}

/// The full program catalog: an ordered list of tracks, defined once and
/// loaded at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog from explicit track data.
    ///
    /// Every track must carry at least one card; the first track's cards
    /// define the mandatory setup sequence.
    pub fn new(tracks: Vec<Track>) -> Self {
        assert!(!tracks.is_empty(), "catalog requires at least one track");
        assert!(
            tracks.iter().all(|t| !t.cards.is_empty()),
            "every track requires at least one card"
        );
        Self { tracks }
    }

    /// The production program content.
    pub fn builtin() -> Self {
        Self::new(catalog::builtin_tracks())
    }

    /// Iterate tracks in program order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Look up a card by id.
    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.tracks
            .iter()
            .flat_map(|t| t.cards.iter())
            .find(|c| c.id == card_id)
    }

    /// Look up the track containing a card.
    pub fn track_of(&self, card_id: &str) -> Option<&Track> {
        self.tracks
            .iter()
            .find(|t| t.cards.iter().any(|c| c.id == card_id))
    }

    /// Locate a card as (track index, card index within the track).
    pub fn position(&self, card_id: &str) -> Option<(usize, usize)> {
        for (ti, track) in self.tracks.iter().enumerate() {
            if let Some(ci) = track.cards.iter().position(|c| c.id == card_id) {
                return Some((ti, ci));
            }
        }
        None
    }

    /// The first card of the first track — unlocked by definition.
    pub fn first_card(&self) -> &Card {
        self.tracks[0].first_card()
    }

    /// The first track — always active.
    pub fn setup_track(&self) -> &Track {
        &self.tracks[0]
    }

    /// The designated setup-completion card: the last card of the first
    /// track. Completing it is the sole cross-track unlock trigger.
    pub fn setup_completion_card(&self) -> &Card {
        let setup = &self.tracks[0];
        setup.cards.last().expect("setup track is non-empty")
    }
}
