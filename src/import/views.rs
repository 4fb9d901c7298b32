// # View Keys & Registry
//
// A "view" is one logical source of importable items (e.g. "Liked Videos").
// Views are configured by the host as encoded keys; the registry maps each
// key to a display label. The "Watch Later" entry is templated: its
// `playlist_id` parameter is rebound to the user's actual watch-later
// playlist before matching, so one static entry resolves for every user.

use crate::identity::UserIdentity;
use std::collections::BTreeMap;
use std::fmt;

/// Import mode of a view. Closed set; anything unrecognized decodes to
/// `Unknown` and is skipped at the smallest enclosing scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    MyChannel,
    LikedVideos,
    Playlist,
    FavoritePlaylists,
    Unknown,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::MyChannel => "my_channel",
            ViewMode::LikedVideos => "liked_videos",
            ViewMode::Playlist => "playlist",
            ViewMode::FavoritePlaylists => "favorite_playlists",
            ViewMode::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> ViewMode {
        match value {
            "my_channel" => ViewMode::MyChannel,
            "liked_videos" => ViewMode::LikedVideos,
            "playlist" => ViewMode::Playlist,
            "favorite_playlists" => ViewMode::FavoritePlaylists,
            _ => ViewMode::Unknown,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical encoded identifier for a view's mode and parameters.
///
/// Encoded form is `mode=<mode>` followed by the remaining parameters in
/// sorted key order, values percent-encoded. Two keys are equal iff their
/// encoded forms are equal, so registry lookup is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey(String);

impl ViewKey {
    pub fn new(mode: ViewMode, params: BTreeMap<String, String>) -> Self {
        Self(canonicalize(mode.as_str(), &params))
    }

    /// Re-canonicalize an externally stored key. Unknown modes survive
    /// round-tripping so stale configured keys stay distinguishable.
    pub fn from_encoded(encoded: &str) -> Self {
        let (mode, params) = decode_parts(encoded);
        Self(canonicalize(&mode, &params))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mode(&self) -> ViewMode {
        ViewMode::parse(&decode_parts(&self.0).0)
    }

    pub fn params(&self) -> BTreeMap<String, String> {
        decode_parts(&self.0).1
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params().contains_key(name)
    }

    /// A copy of this key with one parameter rebound.
    pub fn with_param(&self, name: &str, value: &str) -> ViewKey {
        let (mode, mut params) = decode_parts(&self.0);
        params.insert(name.to_string(), value.to_string());
        Self(canonicalize(&mode, &params))
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonicalize(mode: &str, params: &BTreeMap<String, String>) -> String {
    let mut encoded = format!("mode={}", urlencoding::encode(mode));
    for (key, value) in params {
        if key == "mode" {
            continue;
        }
        encoded.push('&');
        encoded.push_str(&urlencoding::encode(key));
        encoded.push('=');
        encoded.push_str(&urlencoding::encode(value));
    }
    encoded
}

fn decode_parts(encoded: &str) -> (String, BTreeMap<String, String>) {
    let mut mode = String::new();
    let mut params = BTreeMap::new();

    for pair in encoded.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(key)
            .map(|k| k.into_owned())
            .unwrap_or_else(|_| key.to_string());
        let value = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        if key == "mode" {
            mode = value;
        } else {
            params.insert(key, value);
        }
    }

    (mode, params)
}

/// A resolved view: display label plus the key it was configured under.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub label: String,
    pub key: ViewKey,
}

/// The static registry of importable views.
///
/// The "Watch Later" entry is a template: its `playlist_id` is empty and is
/// rebound per user in `resolve_views`. Kept as a plain ordered list so it
/// stays renderable for settings UIs and tests.
fn registry() -> Vec<(ViewKey, &'static str)> {
    vec![
        (
            ViewKey::new(ViewMode::MyChannel, BTreeMap::new()),
            "My Channel",
        ),
        (
            ViewKey::new(ViewMode::LikedVideos, BTreeMap::new()),
            "Liked Videos",
        ),
        (
            ViewKey::new(
                ViewMode::Playlist,
                BTreeMap::from([("playlist_id".to_string(), String::new())]),
            ),
            "Watch Later",
        ),
        (
            ViewKey::new(ViewMode::FavoritePlaylists, BTreeMap::new()),
            "Favorite Playlists",
        ),
    ]
}

/// The registry keys a host can offer for configuration, with the
/// watch-later template already bound to `identity`.
pub fn available_views(identity: &UserIdentity) -> Vec<View> {
    bound_registry(identity)
        .into_iter()
        .map(|(key, label)| View {
            label: label.to_string(),
            key,
        })
        .collect()
}

/// Resolve configured keys against the registry.
///
/// Result order mirrors `view_keys`; keys with no registry match are dropped
/// silently (the user may have configured a view the registry no longer
/// exposes).
pub fn resolve_views(view_keys: &[ViewKey], identity: &UserIdentity) -> Vec<View> {
    let table = bound_registry(identity);

    view_keys
        .iter()
        .filter_map(|key| {
            table
                .iter()
                .find(|(candidate, _)| candidate == key)
                .map(|(_, label)| View {
                    label: (*label).to_string(),
                    key: key.clone(),
                })
        })
        .collect()
}

fn bound_registry(identity: &UserIdentity) -> Vec<(ViewKey, &'static str)> {
    registry()
        .into_iter()
        .map(|(key, label)| {
            if key.has_param("playlist_id") {
                (
                    key.with_param("playlist_id", &identity.watchlater_playlist),
                    label,
                )
            } else {
                (key, label)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> UserIdentity {
        UserIdentity::new("WL-123", "HL-456")
    }

    #[test]
    fn encoding_is_canonical_regardless_of_param_insertion_order() {
        let mut forward = BTreeMap::new();
        forward.insert("b".to_string(), "2".to_string());
        forward.insert("a".to_string(), "1".to_string());

        let key = ViewKey::new(ViewMode::Playlist, forward);
        assert_eq!(key.as_str(), "mode=playlist&a=1&b=2");
    }

    #[test]
    fn values_are_percent_encoded() {
        let params = BTreeMap::from([("playlist_id".to_string(), "a b&c".to_string())]);
        let key = ViewKey::new(ViewMode::Playlist, params.clone());
        assert_eq!(key.as_str(), "mode=playlist&playlist_id=a%20b%26c");
        assert_eq!(key.params(), params);
    }

    #[test]
    fn from_encoded_round_trips_unknown_modes() {
        let key = ViewKey::from_encoded("mode=subscriptions");
        assert_eq!(key.mode(), ViewMode::Unknown);
        assert_eq!(key.as_str(), "mode=subscriptions");
    }

    #[test]
    fn resolve_preserves_input_order_and_drops_unmatched() {
        let identity = identity();
        let liked = ViewKey::new(ViewMode::LikedVideos, BTreeMap::new());
        let stale = ViewKey::from_encoded("mode=subscriptions");
        let my_channel = ViewKey::new(ViewMode::MyChannel, BTreeMap::new());

        let views = resolve_views(&[liked.clone(), stale, my_channel.clone()], &identity);

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].label, "Liked Videos");
        assert_eq!(views[0].key, liked);
        assert_eq!(views[1].label, "My Channel");
        assert_eq!(views[1].key, my_channel);
    }

    #[test]
    fn watch_later_template_rebinds_to_identity_playlist() {
        let identity = identity();
        let configured = ViewKey::new(
            ViewMode::Playlist,
            BTreeMap::from([("playlist_id".to_string(), "WL-123".to_string())]),
        );

        let views = resolve_views(&[configured.clone()], &identity);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].label, "Watch Later");
        assert_eq!(views[0].key, configured);
    }

    #[test]
    fn watch_later_rebinding_is_idempotent() {
        let identity = identity();
        let configured = ViewKey::new(
            ViewMode::Playlist,
            BTreeMap::from([("playlist_id".to_string(), "WL-123".to_string())]),
        );

        let first = resolve_views(&[configured.clone()], &identity);
        let second = resolve_views(&[configured], &identity);
        assert_eq!(first, second);
    }

    #[test]
    fn playlist_key_with_foreign_id_does_not_resolve() {
        let identity = identity();
        let configured = ViewKey::new(
            ViewMode::Playlist,
            BTreeMap::from([("playlist_id".to_string(), "someone-elses".to_string())]),
        );

        assert!(resolve_views(&[configured], &identity).is_empty());
    }

    #[test]
    fn resolve_never_duplicates() {
        let identity = identity();
        let liked = ViewKey::new(ViewMode::LikedVideos, BTreeMap::new());
        let views = resolve_views(&[liked.clone(), liked], &identity);
        // Configuring the same key twice yields it twice, in order, but a
        // single configured key never fans out.
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.label == "Liked Videos"));
    }

    #[test]
    fn available_views_exposes_bound_watch_later() {
        let identity = identity();
        let views = available_views(&identity);
        let watch_later = views.iter().find(|v| v.label == "Watch Later").unwrap();
        assert_eq!(
            watch_later.key.params().get("playlist_id").unwrap(),
            "WL-123"
        );
    }
}
