//! Turns a ranking into the concrete track list for the mirror playlist.
//!
//! Ranked tracks come first. When the ranking is short, the list is padded
//! from the original order. Identity is the track identifier, not the index,
//! so a ranking that references the same track twice cannot duplicate it.

use log::debug;
use std::collections::HashSet;

use crate::track::Track;
use crate::vibe::VibeLabel;

/// Pick up to `count` distinct tracks, ranked ones first.
///
/// Out-of-range indices in `ranked` are ignored. `label` does not affect the
/// result.
///
/// # Examples
///
/// ```
/// use vibe_mirror::selector::select_tracks;
/// use vibe_mirror::track::Track;
/// use vibe_mirror::vibe::VibeLabel;
///
/// let tracks: Vec<Track> = ["A", "B", "C"]
///     .iter()
///     .map(|id| Track {
///         id: id.to_string(),
///         name: id.to_string(),
///         artist: String::new(),
///         popularity: 0,
///         uri: String::new(),
///     })
///     .collect();
///
/// let chosen = select_tracks(VibeLabel::Mixed, &[2, 0], &tracks, 3);
/// let ids: Vec<&str> = chosen.iter().map(|t| t.id.as_str()).collect();
/// assert_eq!(ids, ["C", "A", "B"]);
/// ```
#[must_use]
pub fn select_tracks<'a>(label: VibeLabel, ranked: &[usize], tracks: &'a [Track], count: usize) -> Vec<&'a Track> {
    let mut chosen: Vec<&Track> = Vec::with_capacity(count.min(tracks.len()));
    let mut seen: HashSet<&str> = HashSet::with_capacity(count);

    let ranked_tracks = ranked.iter().filter_map(|&i| tracks.get(i));
    let mut padded = 0usize;

    for track in ranked_tracks {
        if chosen.len() >= count {
            break;
        }
        if seen.insert(track.id.as_str()) {
            chosen.push(track);
        }
    }

    for track in tracks {
        if chosen.len() >= count {
            break;
        }
        if seen.insert(track.id.as_str()) {
            chosen.push(track);
            padded += 1;
        }
    }

    debug!(
        "Selected {} of {count} requested tracks for {label} vibe ({padded} padded)",
        chosen.len()
    );
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::fixtures;

    fn ids<'a>(tracks: &[&'a Track]) -> Vec<&'a str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }

    fn abc() -> Vec<Track> {
        vec![fixtures::track("A", 10), fixtures::track("B", 20), fixtures::track("C", 30)]
    }

    #[test]
    fn test_ranked_prefix_then_remainder() {
        let tracks = abc();
        let chosen = select_tracks(VibeLabel::Niche, &[2, 0], &tracks, 3);

        assert_eq!(ids(&chosen), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_stops_at_count() {
        let tracks = abc();
        let chosen = select_tracks(VibeLabel::Mainstream, &[1, 2, 0], &tracks, 2);

        assert_eq!(ids(&chosen), vec!["B", "C"]);
    }

    #[test]
    fn test_duplicate_identifiers_are_skipped() {
        let mut tracks = abc();
        tracks.push(fixtures::track("A", 99));

        let chosen = select_tracks(VibeLabel::Mixed, &[3, 0, 0, 1], &tracks, 4);

        assert_eq!(ids(&chosen), vec!["A", "B", "C"]);
        assert_eq!(chosen[0].popularity, 99, "first reference wins");
    }

    #[test]
    fn test_out_of_range_indices_ignored() {
        let tracks = abc();
        let chosen = select_tracks(VibeLabel::Mixed, &[7, 1, 42], &tracks, 3);

        assert_eq!(ids(&chosen), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_short_source_returns_everything() {
        let tracks = abc();
        let chosen = select_tracks(VibeLabel::Mixed, &[], &tracks, 10);

        assert_eq!(ids(&chosen), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_zero_count_and_empty_input() {
        let tracks = abc();
        assert!(select_tracks(VibeLabel::Mixed, &[0, 1], &tracks, 0).is_empty());
        assert!(select_tracks(VibeLabel::Mixed, &[0, 1], &[], 5).is_empty());
    }

    #[test]
    fn test_length_and_dedup_laws() {
        let tracks = fixtures::tracks(&[5, 60, 33, 90, 12, 47, 71]);
        let rankings: [&[usize]; 4] = [&[], &[6, 6, 6], &[3, 1, 4, 1, 5], &[0, 1, 2, 3, 4, 5, 6]];

        for ranked in rankings {
            for count in 0..=9 {
                let chosen = select_tracks(VibeLabel::Mixed, ranked, &tracks, count);
                let unique: HashSet<_> = chosen.iter().map(|t| &t.id).collect();

                assert_eq!(chosen.len(), count.min(tracks.len()));
                assert_eq!(unique.len(), chosen.len());
            }
        }
    }
}
