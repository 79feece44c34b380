// Page-agnostic content payloads.
// Sheets-specific response types stay in sheets.rs; conversion happens there.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::sections::{parse_sections, Sections};

/// Substituted for every field when the content source cannot be read.
pub const ERROR_SENTINEL: &str = "Error fetching data";

/// Title and description for a single OSI layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub title: String,
    pub description: String,
}

impl LayerEntry {
    fn sentinel() -> Self {
        Self {
            title: ERROR_SENTINEL.to_string(),
            description: ERROR_SENTINEL.to_string(),
        }
    }
}

/// Plain-text descriptions of the three transmission models.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkModels {
    pub basic_network: String,
    pub hub_network: String,
    pub router_network: String,
}

/// Everything the pages display, read once per page visit.
///
/// Field names serialize to the keys the pages select by (`popup1`,
/// `physicalLayer`, `networkModels`, ...), so fixtures recorded from a live
/// fetch can be replayed verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub popup1: String,
    pub popup2: String,
    pub physical_layer: LayerEntry,
    pub data_link_layer: LayerEntry,
    pub network_layer: LayerEntry,
    pub transport_layer: LayerEntry,
    pub session_layer: LayerEntry,
    pub presentation_layer: LayerEntry,
    pub application_layer: LayerEntry,
    pub network_models: NetworkModels,
}

impl ContentRecord {
    /// Same shape as a successful record, every field set to [`ERROR_SENTINEL`].
    pub fn error_fallback() -> Self {
        let sentinel = || ERROR_SENTINEL.to_string();
        Self {
            popup1: sentinel(),
            popup2: sentinel(),
            physical_layer: LayerEntry::sentinel(),
            data_link_layer: LayerEntry::sentinel(),
            network_layer: LayerEntry::sentinel(),
            transport_layer: LayerEntry::sentinel(),
            session_layer: LayerEntry::sentinel(),
            presentation_layer: LayerEntry::sentinel(),
            application_layer: LayerEntry::sentinel(),
            network_models: NetworkModels {
                basic_network: sentinel(),
                hub_network: sentinel(),
                router_network: sentinel(),
            },
        }
    }

    pub fn layer(&self, layer: OsiLayer) -> &LayerEntry {
        match layer {
            OsiLayer::Physical => &self.physical_layer,
            OsiLayer::DataLink => &self.data_link_layer,
            OsiLayer::Network => &self.network_layer,
            OsiLayer::Transport => &self.transport_layer,
            OsiLayer::Session => &self.session_layer,
            OsiLayer::Presentation => &self.presentation_layer,
            OsiLayer::Application => &self.application_layer,
        }
    }

    pub fn layer_mut(&mut self, layer: OsiLayer) -> &mut LayerEntry {
        match layer {
            OsiLayer::Physical => &mut self.physical_layer,
            OsiLayer::DataLink => &mut self.data_link_layer,
            OsiLayer::Network => &mut self.network_layer,
            OsiLayer::Transport => &mut self.transport_layer,
            OsiLayer::Session => &mut self.session_layer,
            OsiLayer::Presentation => &mut self.presentation_layer,
            OsiLayer::Application => &mut self.application_layer,
        }
    }

    pub fn network_model(&self, model: NetworkModel) -> &str {
        match model {
            NetworkModel::Basic => &self.network_models.basic_network,
            NetworkModel::Hub => &self.network_models.hub_network,
            NetworkModel::Router => &self.network_models.router_network,
        }
    }

    /// Every text field, in declaration order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = vec![self.popup1.as_str(), self.popup2.as_str()];
        for layer in OsiLayer::ALL {
            let entry = self.layer(layer);
            fields.push(&entry.title);
            fields.push(&entry.description);
        }
        for model in NetworkModel::ALL {
            fields.push(self.network_model(model));
        }
        fields
    }

    /// Overlay content for a selection key, or `None` if the key is unknown.
    pub fn lookup(&self, key: &str) -> Option<OverlayContent> {
        let content = match key.parse::<ContentKey>().ok()? {
            ContentKey::Popup1 => OverlayContent::Sections(parse_sections(&self.popup1)),
            ContentKey::Popup2 => OverlayContent::Sections(parse_sections(&self.popup2)),
            ContentKey::Layer(layer) => OverlayContent::Entry(self.layer(layer).clone()),
            ContentKey::NetworkModel(model) => {
                OverlayContent::Text(self.network_model(model).to_string())
            }
        };
        Some(content)
    }
}

/// What an overlay renders for a looked-up key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayContent {
    /// Topology popups: blank-line separated title/description/pros/cons.
    Sections(Sections),
    /// OSI layers: structured title and description.
    Entry(LayerEntry),
    /// Transmission models: a single paragraph.
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OsiLayer {
    Physical,
    DataLink,
    Network,
    Transport,
    Session,
    Presentation,
    Application,
}

impl OsiLayer {
    /// Bottom (layer 1) to top (layer 7).
    pub const ALL: [OsiLayer; 7] = [
        OsiLayer::Physical,
        OsiLayer::DataLink,
        OsiLayer::Network,
        OsiLayer::Transport,
        OsiLayer::Session,
        OsiLayer::Presentation,
        OsiLayer::Application,
    ];

    pub fn key(self) -> &'static str {
        match self {
            OsiLayer::Physical => "physicalLayer",
            OsiLayer::DataLink => "dataLinkLayer",
            OsiLayer::Network => "networkLayer",
            OsiLayer::Transport => "transportLayer",
            OsiLayer::Session => "sessionLayer",
            OsiLayer::Presentation => "presentationLayer",
            OsiLayer::Application => "applicationLayer",
        }
    }

    /// 1-based layer number.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            OsiLayer::Physical => "Physical",
            OsiLayer::DataLink => "Data Link",
            OsiLayer::Network => "Network",
            OsiLayer::Transport => "Transport",
            OsiLayer::Session => "Session",
            OsiLayer::Presentation => "Presentation",
            OsiLayer::Application => "Application",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NetworkModel {
    #[default]
    Basic,
    Hub,
    Router,
}

impl NetworkModel {
    pub const ALL: [NetworkModel; 3] = [NetworkModel::Basic, NetworkModel::Hub, NetworkModel::Router];

    pub fn key(self) -> &'static str {
        match self {
            NetworkModel::Basic => "basicNetwork",
            NetworkModel::Hub => "hubNetwork",
            NetworkModel::Router => "routerNetwork",
        }
    }

    /// 1-based model number shown on the buttons.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            NetworkModel::Basic => "Model 1: Basic Network",
            NetworkModel::Hub => "Model 2: Hub Network",
            NetworkModel::Router => "Model 3: Router Network",
        }
    }
}

/// Typed form of the string keys selectables carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKey {
    Popup1,
    Popup2,
    Layer(OsiLayer),
    NetworkModel(NetworkModel),
}

#[derive(Debug, thiserror::Error)]
#[error("unknown content key {0:?}")]
pub struct UnknownContentKey(pub String);

impl FromStr for ContentKey {
    type Err = UnknownContentKey;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "popup1" => return Ok(ContentKey::Popup1),
            "popup2" => return Ok(ContentKey::Popup2),
            _ => {}
        }
        if let Some(layer) = OsiLayer::ALL.into_iter().find(|l| l.key() == key) {
            return Ok(ContentKey::Layer(layer));
        }
        if let Some(model) = NetworkModel::ALL.into_iter().find(|m| m.key() == key) {
            return Ok(ContentKey::NetworkModel(model));
        }
        Err(UnknownContentKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ContentRecord {
        let mut record = ContentRecord {
            popup1: "Bus\n\nSatu kabel utama".into(),
            popup2: "Ring\n\nMelingkar".into(),
            ..Default::default()
        };
        for layer in OsiLayer::ALL {
            *record.layer_mut(layer) = LayerEntry {
                title: format!("Layer {}", layer.number()),
                description: layer.label().to_string(),
            };
        }
        record.network_models.hub_network = "Semua lewat hub".into();
        record
    }

    #[test]
    fn fallback_has_every_field_set_to_sentinel() {
        let record = ContentRecord::error_fallback();
        let fields = record.fields();
        assert_eq!(fields.len(), sample_record().fields().len());
        assert!(fields.iter().all(|f| *f == ERROR_SENTINEL));
    }

    #[test]
    fn lookup_resolves_each_key_family() {
        let record = sample_record();

        match record.lookup("popup1") {
            Some(OverlayContent::Sections(sections)) => assert_eq!(sections.title, "Bus"),
            other => panic!("unexpected {other:?}"),
        }
        match record.lookup("transportLayer") {
            Some(OverlayContent::Entry(entry)) => assert_eq!(entry.title, "Layer 4"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            record.lookup("hubNetwork"),
            Some(OverlayContent::Text("Semua lewat hub".into()))
        );
    }

    #[test]
    fn lookup_misses_unknown_key() {
        assert_eq!(sample_record().lookup("layer8"), None);
    }

    #[test]
    fn serializes_with_page_keys() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert!(json.get("physicalLayer").is_some());
        assert!(json["networkModels"].get("routerNetwork").is_some());
    }
}
