//! Scene graph holding the rendered card tree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{CardError, CardResult, Element, ElementId, ElementKind};

/// A scene containing all rendered elements.
///
/// Every mutation bumps [`Scene::revision`], which the render layer uses to
/// announce which state of the scene is on screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// All elements in the scene, indexed by ID.
    elements: HashMap<ElementId, Element>,
    /// Root-level element IDs (not children of any panel).
    root_elements: Vec<ElementId>,
    /// Mutation counter.
    revision: u64,
    /// Viewport width in pixels.
    pub viewport_width: f32,
    /// Viewport height in pixels.
    pub viewport_height: f32,
}

impl Scene {
    /// Create a new empty scene with the given viewport size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            elements: HashMap::new(),
            root_elements: Vec::new(),
            revision: 0,
            viewport_width: width,
            viewport_height: height,
        }
    }

    /// Current mutation counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add a root-level element to the scene.
    pub fn add_element(&mut self, mut element: Element) -> ElementId {
        let id = element.id.clone();
        element.parent = None;
        self.root_elements.retain(|eid| *eid != id);
        self.root_elements.push(id.clone());
        self.elements.insert(id.clone(), element);
        self.revision += 1;
        id
    }

    /// Add an element as the last child of a panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent is missing or is not a panel.
    pub fn add_child(&mut self, parent: &ElementId, mut element: Element) -> CardResult<ElementId> {
        let id = element.id.clone();
        let parent_element = self
            .elements
            .get_mut(parent)
            .ok_or_else(|| CardError::ElementNotFound(parent.to_string()))?;

        match &mut parent_element.kind {
            ElementKind::Panel { children, .. } => children.push(id.clone()),
            _ => {
                return Err(CardError::InvalidOperation(format!(
                    "{parent} cannot hold children"
                )))
            }
        }

        element.parent = Some(parent.clone());
        self.elements.insert(id.clone(), element);
        self.revision += 1;
        Ok(id)
    }

    /// Remove an element and all of its descendants.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn remove_subtree(&mut self, id: &ElementId) -> CardResult<Vec<Element>> {
        if !self.elements.contains_key(id) {
            return Err(CardError::ElementNotFound(id.to_string()));
        }

        let ids: Vec<ElementId> = self.subtree(id).into_iter().map(|e| e.id.clone()).collect();
        let parent = self.elements.get(id).and_then(|e| e.parent.clone());

        if let Some(parent) = parent {
            if let Some(Element {
                kind: ElementKind::Panel { children, .. },
                ..
            }) = self.elements.get_mut(&parent)
            {
                children.retain(|c| c != id);
            }
        }
        self.root_elements.retain(|eid| eid != id);

        let removed = ids
            .iter()
            .filter_map(|eid| self.elements.remove(eid))
            .collect();
        self.revision += 1;
        Ok(removed)
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get_element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Check whether an element is present.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Get root-level elements.
    pub fn root_elements(&self) -> impl Iterator<Item = &Element> {
        self.root_elements
            .iter()
            .filter_map(|id| self.elements.get(id))
    }

    /// The element and its descendants in paint order.
    ///
    /// Parents come before their children; siblings are ordered by z-index,
    /// ties keep insertion order. Empty if `id` is unknown.
    #[must_use]
    pub fn subtree(&self, id: &ElementId) -> Vec<&Element> {
        let mut out = Vec::new();
        if let Some(root) = self.elements.get(id) {
            self.collect(root, &mut out);
        }
        out
    }

    fn collect<'a>(&'a self, element: &'a Element, out: &mut Vec<&'a Element>) {
        out.push(element);
        let mut children: Vec<&Element> = element
            .children()
            .iter()
            .filter_map(|c| self.elements.get(c))
            .collect();
        children.sort_by_key(|c| c.transform.z_index);
        for child in children {
            self.collect(child, out);
        }
    }

    /// Get the number of elements in the scene.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FontWeight, TextAlign, Transform};

    fn panel() -> Element {
        Element::new(ElementKind::Panel {
            fill: "#ffffff".to_string(),
            stroke: None,
            corner_radius: 8.0,
            children: Vec::new(),
        })
    }

    fn text(content: &str) -> Element {
        Element::new(ElementKind::Text {
            content: content.to_string(),
            font_size: 16.0,
            color: "#000000".to_string(),
            weight: FontWeight::Normal,
            align: TextAlign::Start,
            line_height: 1.4,
        })
    }

    #[test]
    fn test_scene_add_remove() {
        let mut scene = Scene::new(800.0, 600.0);
        assert!(scene.is_empty());

        let id = scene.add_element(text("Hello"));
        assert_eq!(scene.element_count(), 1);
        assert!(scene.get_element(&id).is_some());

        scene.remove_subtree(&id).expect("should remove");
        assert!(scene.is_empty());
        assert_eq!(scene.root_elements().count(), 0);
    }

    #[test]
    fn test_revision_bumps_on_mutation() {
        let mut scene = Scene::new(800.0, 600.0);
        let r0 = scene.revision();
        let id = scene.add_element(panel());
        let r1 = scene.revision();
        scene.add_child(&id, text("a")).expect("child");
        let r2 = scene.revision();
        assert!(r0 < r1 && r1 < r2);
    }

    #[test]
    fn test_subtree_paint_order() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.add_element(panel().with_id("card".into()));
        let back = text("back").with_transform(Transform {
            z_index: -1,
            ..Transform::default()
        });
        let front = scene.add_child(&root, text("front")).expect("child");
        let back = scene.add_child(&root, back).expect("child");

        let order: Vec<_> = scene
            .subtree(&"card".into())
            .into_iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(order, vec![root, back, front]);
    }

    #[test]
    fn test_remove_subtree_removes_descendants() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.add_element(panel());
        let inner = scene.add_child(&root, panel()).expect("inner");
        scene.add_child(&inner, text("deep")).expect("deep");
        scene.add_element(text("sibling"));

        let removed = scene.remove_subtree(&root).expect("remove");
        assert_eq!(removed.len(), 3);
        assert_eq!(scene.element_count(), 1);
    }

    #[test]
    fn test_remove_child_detaches_from_parent() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.add_element(panel());
        let child = scene.add_child(&root, text("x")).expect("child");
        scene.remove_subtree(&child).expect("remove");
        assert!(scene.get_element(&root).expect("root").children().is_empty());
    }

    #[test]
    fn test_add_child_to_text_fails() {
        let mut scene = Scene::new(800.0, 600.0);
        let t = scene.add_element(text("leaf"));
        let err = scene.add_child(&t, text("x")).unwrap_err();
        assert!(matches!(err, CardError::InvalidOperation(_)));

        let missing = scene.add_child(&"nope".into(), text("x")).unwrap_err();
        assert!(matches!(missing, CardError::ElementNotFound(_)));
    }

    #[test]
    fn test_remove_missing_fails() {
        let mut scene = Scene::new(800.0, 600.0);
        assert!(scene.remove_subtree(&ElementId::new()).is_err());
    }
}
