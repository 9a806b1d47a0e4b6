use crate::event::{Event, EventKind, segment_start};
use serde::{Deserialize, Serialize};

/// The Static Analysis View of a typer queue.
///
/// `Schematic` is the graph representation extracted from the queued events.
/// It is used for visualization and documentation of a script.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Schematic {
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Schematic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build the graph of `events`: a linear chain plus one back edge per loop.
    pub fn from_events(name: impl Into<String>, events: &[Event]) -> Self {
        let mut schematic = Self::new(name);

        for (index, event) in events.iter().enumerate() {
            schematic.nodes.push(Node {
                id: index,
                kind: event.kind(),
                label: event.label(),
                config: serde_json::to_value(event).unwrap_or(serde_json::Value::Null),
            });

            if index > 0 {
                schematic.edges.push(Edge {
                    from: index - 1,
                    to: index,
                    kind: EdgeType::Linear,
                });
            }

            if let Event::Loop(config) = event {
                let start = segment_start(events, index);
                if start < index {
                    schematic.edges.push(Edge {
                        from: index,
                        to: start,
                        kind: EdgeType::LoopBack {
                            count: config.count,
                        },
                    });
                }
            }
        }

        schematic
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub kind: EventKind,
    pub label: String,
    pub config: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeType {
    Linear,
    LoopBack { count: Option<u32> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeType,
}
