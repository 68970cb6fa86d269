//! Raw Bus Time API response documents.
//!
//! Each upstream endpoint gets its own document type tagged by endpoint.
//! The documents keep the upstream nesting faithfully and do not try to
//! flatten anything; that is the catalog normalizer's job. The JSON
//! endpoint deserializes with serde, the XML endpoints parse with
//! roxmltree. Fields use `Option` because Bus Time omits elements rather
//! than sending empty ones.

use roxmltree::Node;
use serde::Deserialize;

use super::error::BustimeError;

/// Response from `routes-for-agency/{agency}.xml`.
///
/// Upstream envelope: `<response><data><list><route>…</route></list></data></response>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteListDocument {
    pub routes: Vec<RawRoute>,
}

/// A `<route>` element, text fields as sent (possibly absent).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRoute {
    pub id: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub description: Option<String>,
}

impl RouteListDocument {
    /// Parse the XML body of a routes-for-agency response.
    ///
    /// A body that is not XML, or that lacks the `<data><list>` envelope,
    /// is a malformed response.
    pub fn parse(xml: &str) -> Result<Self, BustimeError> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| BustimeError::Xml {
            message: e.to_string(),
        })?;

        let list = doc
            .descendants()
            .find(|n| n.has_tag_name("data"))
            .and_then(|data| data.descendants().find(|n| n.has_tag_name("list")))
            .ok_or_else(|| BustimeError::Xml {
                message: "missing <data><list> envelope".to_string(),
            })?;

        let routes = list
            .children()
            .filter(|n| n.has_tag_name("route"))
            .map(|route| RawRoute {
                id: child_text(route, "id"),
                short_name: child_text(route, "shortName"),
                long_name: child_text(route, "longName"),
                description: child_text(route, "description"),
            })
            .collect();

        Ok(Self { routes })
    }
}

/// Response from `stop/{stop}.xml`.
///
/// The `<data>` element carries the stop name plus the serving route's
/// long name and description; any of the three may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopDetailDocument {
    pub name: Option<String>,
    pub long_name: Option<String>,
    pub description: Option<String>,
}

impl StopDetailDocument {
    /// Parse the XML body of a single-stop response.
    pub fn parse(xml: &str) -> Result<Self, BustimeError> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| BustimeError::Xml {
            message: e.to_string(),
        })?;

        let data = doc
            .descendants()
            .find(|n| n.has_tag_name("data"))
            .ok_or_else(|| BustimeError::Xml {
                message: "missing <data> envelope".to_string(),
            })?;

        Ok(Self {
            name: descendant_text(data, "name"),
            long_name: descendant_text(data, "longName"),
            description: descendant_text(data, "description"),
        })
    }
}

/// Text of the first direct child with the given tag name.
fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(str::to_string)
}

/// Text of the first descendant with the given tag name (document order).
fn descendant_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    node.descendants()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(str::to_string)
}

/// Response from `stops-for-route/{route}.json?version=2`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopsForRouteDocument {
    pub data: StopsForRouteData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopsForRouteData {
    pub entry: StopsForRouteEntry,
    #[serde(default)]
    pub references: References,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopsForRouteEntry {
    /// Normally exactly one grouping (by direction) per route.
    #[serde(default)]
    pub stop_groupings: Vec<StopGrouping>,
}

/// A partition of the route's stops, containing direction-keyed groups.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopGrouping {
    #[serde(default)]
    pub stop_groups: Vec<StopGroup>,
}

/// One travel direction along the route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopGroup {
    /// Direction id, unique only within this route's grouping.
    pub id: String,
    pub name: GroupName,
    /// References into `data.references.stops`.
    #[serde(default)]
    pub stop_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupName {
    pub name: String,
}

/// Shared lookup tables for the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct References {
    #[serde(default)]
    pub stops: Vec<StopReference>,
}

/// Full stop record in the document's reference table.
#[derive(Debug, Clone, Deserialize)]
pub struct StopReference {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <currentTime>1409087610874</currentTime>
  <data class="listWithReferences">
    <list>
      <route>
        <id>MTA NYCT_B65</id>
        <shortName>B65</shortName>
        <longName>Downtown Brooklyn - Crown Heights</longName>
        <description>via Bergen St &amp; Dean St</description>
      </route>
      <route>
        <id>MTA NYCT_B25</id>
        <shortName>B25</shortName>
      </route>
    </list>
  </data>
</response>"#;

    #[test]
    fn parse_route_list() {
        let doc = RouteListDocument::parse(ROUTES_XML).unwrap();
        assert_eq!(doc.routes.len(), 2);
        assert_eq!(doc.routes[0].id.as_deref(), Some("MTA NYCT_B65"));
        assert_eq!(doc.routes[0].short_name.as_deref(), Some("B65"));
        assert_eq!(
            doc.routes[0].description.as_deref(),
            Some("via Bergen St & Dean St")
        );
        assert_eq!(doc.routes[1].long_name, None);
    }

    #[test]
    fn parse_route_list_rejects_non_xml() {
        let err = RouteListDocument::parse("{\"not\": \"xml\"}").unwrap_err();
        assert!(matches!(err, BustimeError::Xml { .. }));
    }

    #[test]
    fn parse_route_list_rejects_missing_envelope() {
        let err = RouteListDocument::parse("<response><data/></response>").unwrap_err();
        assert!(matches!(err, BustimeError::Xml { .. }));
        assert!(err.to_string().contains("envelope"));
    }

    #[test]
    fn parse_stop_detail() {
        let xml = r#"<response>
  <data>
    <id>MTA_305183</id>
    <name>Flatbush Av &amp; Tillary St</name>
    <routes>
      <route>
        <longName>Downtown Brooklyn - Crown Heights</longName>
        <description>via Bergen St &amp; Dean St</description>
      </route>
    </routes>
  </data>
</response>"#;
        let doc = StopDetailDocument::parse(xml).unwrap();
        assert_eq!(doc.name.as_deref(), Some("Flatbush Av & Tillary St"));
        assert_eq!(
            doc.long_name.as_deref(),
            Some("Downtown Brooklyn - Crown Heights")
        );
    }

    #[test]
    fn parse_stop_detail_with_missing_fields() {
        let doc = StopDetailDocument::parse("<response><data><id>x</id></data></response>").unwrap();
        assert_eq!(doc, StopDetailDocument::default());
    }

    #[test]
    fn deserialize_stops_for_route() {
        let json = r#"{
  "data": {
    "entry": {
      "stopGroupings": [
        {
          "stopGroups": [
            {
              "id": "0",
              "name": { "name": "CROWN HTS RALPH AV", "type": "destination" },
              "stopIds": ["MTA_305183", "MTA_305184"]
            }
          ]
        }
      ]
    },
    "references": {
      "stops": [
        { "id": "MTA_305183", "name": "Flatbush Av & Tillary St", "lat": 40.69 }
      ]
    }
  }
}"#;
        let doc: StopsForRouteDocument = serde_json::from_str(json).unwrap();
        let grouping = &doc.data.entry.stop_groupings[0];
        assert_eq!(grouping.stop_groups[0].id, "0");
        assert_eq!(grouping.stop_groups[0].name.name, "CROWN HTS RALPH AV");
        assert_eq!(grouping.stop_groups[0].stop_ids.len(), 2);
        assert_eq!(doc.data.references.stops[0].id, "MTA_305183");
    }

    #[test]
    fn deserialize_stops_for_route_without_references() {
        let json = r#"{ "data": { "entry": { "stopGroupings": [] } } }"#;
        let doc: StopsForRouteDocument = serde_json::from_str(json).unwrap();
        assert!(doc.data.entry.stop_groupings.is_empty());
        assert!(doc.data.references.stops.is_empty());
    }
}
