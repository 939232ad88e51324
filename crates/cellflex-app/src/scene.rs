// ABOUTME: Scene files listing the widgets to build and the drags to replay.
// ABOUTME: Loads scenes from JSON and feeds them into a widget tree.

use std::path::Path;

use anyhow::{Context, Result};
use cellflex_core::{Size, WidgetDescriptor};
use cellflex_layout::WidgetTree;
use serde::{Deserialize, Serialize};

const DEMO: &str = include_str!("../../../demos/workbench.json");

/// One widget of a scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneWidget {
    #[serde(flatten)]
    pub descriptor: WidgetDescriptor,
    /// Content size the host would measure for the widget
    #[serde(default)]
    pub natural_size: Option<Size>,
    /// Pane index for splitter children
    #[serde(default)]
    pub index: Option<usize>,
}

/// A divider drag: press at `from`, move and release at `to`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragReplay {
    pub split: String,
    pub divider: usize,
    pub from: [f64; 2],
    pub to: [f64; 2],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Overrides the configured window size
    #[serde(default)]
    pub window: Option<Size>,
    #[serde(default)]
    pub widgets: Vec<SceneWidget>,
    #[serde(default)]
    pub drags: Vec<DragReplay>,
}

impl Scene {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid scene JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to load scene {}", path.display()))
    }

    /// The built-in workbench scene
    pub fn demo() -> Result<Self> {
        Self::parse(DEMO)
    }

    /// Create every widget in order, then size the window
    pub fn build(&self, tree: &mut WidgetTree) -> Result<()> {
        for widget in &self.widgets {
            let descriptor = widget.descriptor.clone();
            let id = match widget.index {
                Some(index) => tree.create_at(descriptor, index),
                None => tree.create(descriptor),
            }
            .with_context(|| format!("Failed to create widget '{}'", widget.descriptor.id))?;
            if let Some(size) = widget.natural_size {
                tree.set_natural_size(id, size)?;
            }
        }
        let window = self.window.unwrap_or_else(|| tree.window_size());
        tree.window_resized(window);
        let ticks = tree.run_until_idle();
        tracing::info!("Built {} widgets, settled after {} ticks", self.widgets.len(), ticks);
        Ok(())
    }

    /// Replay every drag and let resizes settle after each one
    pub fn replay_drags(&self, tree: &mut WidgetTree) -> Result<()> {
        for drag in &self.drags {
            let split = tree.id(&drag.split)?;
            let from = (drag.from[0], drag.from[1]);
            let to = (drag.to[0], drag.to[1]);
            if !tree.pointer_down(split, drag.divider, from)? {
                tracing::warn!("Drag on '{}' ignored, another drag is running", drag.split);
                continue;
            }
            tree.pointer_move(to);
            tree.pointer_up(to);
            tree.run_until_idle();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellflex_core::{LayoutConfig, WidgetKind};

    #[test]
    fn demo_scene_parses() {
        let scene = Scene::demo().unwrap();
        assert_eq!(scene.window, Some(Size::new(1200.0, 800.0)));
        assert_eq!(scene.widgets[0].descriptor.kind, WidgetKind::Split);
        assert_eq!(scene.drags.len(), 2);

        let title = scene
            .widgets
            .iter()
            .find(|w| w.descriptor.id == "nav-title")
            .unwrap();
        assert_eq!(title.descriptor.parent.as_deref(), Some("nav"));
        assert_eq!(title.natural_size, Some(Size::new(120.0, 24.0)));
    }

    #[test]
    fn flattened_descriptor_fields() {
        let scene = Scene::parse(
            r#"{"widgets": [{"id": "a", "kind": "v_split", "vflex": 2, "index": 0}]}"#,
        )
        .unwrap();
        let widget = &scene.widgets[0];
        assert_eq!(widget.descriptor.kind, WidgetKind::VSplit);
        assert_eq!(widget.descriptor.vflex, 2.0);
        assert_eq!(widget.index, Some(0));
        assert!(scene.window.is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Scene::parse("{ widgets: ").is_err());
        assert!(Scene::load(Path::new("/nonexistent/scene.json")).is_err());
    }

    #[test]
    fn demo_builds_and_replays() {
        let scene = Scene::demo().unwrap();
        let mut tree = WidgetTree::new(LayoutConfig::default());
        scene.build(&mut tree).unwrap();
        assert!(tree.scheduler().is_idle());

        let workbench = tree.id("workbench").unwrap();
        assert_eq!(tree.split(workbench).unwrap().panes().len(), 4);
        assert_eq!(
            tree.get(workbench).unwrap().children[2],
            tree.id("scratch").unwrap()
        );

        scene.replay_drags(&mut tree).unwrap();
        assert_eq!(tree.split(workbench).unwrap().dividers()[0].t, 240.0);
        let editor = tree.id("editor").unwrap();
        assert_eq!(tree.split(editor).unwrap().dividers()[0].t, 560.0);
        assert_eq!(tree.active_drag(), None);
    }

    #[test]
    fn unknown_parent_names_the_widget() {
        let scene = Scene::parse(r#"{"widgets": [{"id": "a", "parent": "ghost"}]}"#).unwrap();
        let mut tree = WidgetTree::new(LayoutConfig::default());
        let err = scene.build(&mut tree).unwrap_err();
        assert!(format!("{:#}", err).contains("'a'"));
    }
}
