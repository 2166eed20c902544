mod params;
mod solid;

pub use params::{ShapeDefaults, ShapeParams};
pub use solid::{ShapeType, SolidData, SolidId, SolidKind, DEFAULT_COLOR};

use slotmap::SlotMap;
use tracing::{debug, error, warn};

use crate::error::{Result, SceneError, SimpaadError};
use crate::export::RenderSolid;
use crate::interpret::{ImagePayload, ShapeInterpreter, ShapeRequest};
use crate::math::{Point3, Transform};
use crate::tessellation::{CatalogResolution, TessellateSolid, TriangleMesh};

/// Label given to interpreted shapes that arrive without one.
pub const SYNTHESIZED_LABEL: &str = "Synthesized Shape";

/// Ordered collection of the primitive solids being edited.
///
/// Solids are addressed by generational ids that are never reused. Iteration
/// follows insertion order, which is also the export order.
#[derive(Debug, Default)]
pub struct Scene {
    solids: SlotMap<SolidId, SolidData>,
    order: Vec<SolidId>,
    selected: Option<SolidId>,
    defaults: ShapeDefaults,
    resolution: CatalogResolution,
}

impl Scene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scene holding a single selected base plate.
    #[must_use]
    pub fn with_workpiece() -> Self {
        let mut scene = Self::new();
        scene.add(SolidData::new(
            SolidKind::Box {
                width: 10.0,
                height: 2.0,
                depth: 10.0,
            },
            Point3::new(0.0, 1.0, 0.0),
            "Workpiece Base",
        ));
        scene
    }

    /// Replaces the defaults used for new and kind-switched shapes.
    #[must_use]
    pub fn with_defaults(mut self, defaults: ShapeDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replaces the catalog resolution used by [`Scene::render_solids`].
    #[must_use]
    pub fn with_resolution(mut self, resolution: CatalogResolution) -> Self {
        self.resolution = resolution;
        self
    }

    #[must_use]
    pub fn defaults(&self) -> &ShapeDefaults {
        &self.defaults
    }

    /// Number of solids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the scene holds no solids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates solids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SolidId, &SolidData)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.solids.get(id).map(|data| (id, data)))
    }

    /// Inserts a solid at the end of the list and selects it.
    pub fn add(&mut self, data: SolidData) -> SolidId {
        let id = self.solids.insert(data);
        self.order.push(id);
        self.selected = Some(id);
        debug!(?id, count = self.order.len(), "solid added");
        id
    }

    /// Adds a default box part above the origin, labelled by its position in the list.
    pub fn add_part(&mut self) -> SolidId {
        let kind = ShapeParams::default().resolve(ShapeType::Box, &self.defaults);
        let label = format!("Part {}", self.len() + 1);
        self.add(SolidData::new(kind, Point3::new(0.0, 5.0, 0.0), label))
    }

    /// Adds a shape described by an interpretation result.
    ///
    /// Missing or non-positive parameters fall back to the scene defaults.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the scene unchanged, if the request names no
    /// kind or an unknown one.
    pub fn add_interpreted(&mut self, request: &ShapeRequest) -> Result<SolidId> {
        let shape_type = request.shape_type()?;
        let kind = request.params.resolve(shape_type, &self.defaults);
        let label = request
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(SYNTHESIZED_LABEL);
        Ok(self.add(SolidData::new(kind, Point3::new(0.0, 5.0, 0.0), label)))
    }

    /// Runs one interpretation request and adds its result.
    ///
    /// # Errors
    ///
    /// Returns the interpretation error, leaving the scene unchanged.
    pub fn interpret_and_add(
        &mut self,
        interpreter: &dyn ShapeInterpreter,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<SolidId> {
        let outcome = interpreter
            .interpret(prompt, image)
            .map_err(SimpaadError::from)
            .and_then(|request| self.add_interpreted(&request));
        if let Err(err) = &outcome {
            error!(%err, prompt, "shape interpretation failed");
        }
        outcome
    }

    /// Returns the solid with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the scene.
    pub fn solid(&self, id: SolidId) -> std::result::Result<&SolidData, SceneError> {
        self.solids.get(id).ok_or(SceneError::SolidNotFound(id))
    }

    fn solid_mut(&mut self, id: SolidId) -> std::result::Result<&mut SolidData, SceneError> {
        self.solids.get_mut(id).ok_or(SceneError::SolidNotFound(id))
    }

    /// Removes a solid. If it was selected, the first remaining solid becomes
    /// selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the scene.
    pub fn remove(&mut self, id: SolidId) -> Result<SolidData> {
        let data = self.solids.remove(id).ok_or(SceneError::SolidNotFound(id))?;
        self.order.retain(|&other| other != id);
        if self.selected == Some(id) {
            self.selected = self.order.first().copied();
        }
        debug!(?id, count = self.order.len(), "solid removed");
        Ok(data)
    }

    /// Selects a solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the scene.
    pub fn select(&mut self, id: SolidId) -> Result<()> {
        self.solid(id)?;
        self.selected = Some(id);
        Ok(())
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Id of the selected solid, if any.
    #[must_use]
    pub fn selected(&self) -> Option<SolidId> {
        self.selected
    }

    /// The selected solid, if any.
    #[must_use]
    pub fn selected_solid(&self) -> Option<(SolidId, &SolidData)> {
        let id = self.selected?;
        self.solids.get(id).map(|data| (id, data))
    }

    /// Switches a solid to another kind, keeping shared dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the scene.
    pub fn set_kind(&mut self, id: SolidId, shape_type: ShapeType) -> Result<()> {
        let defaults = self.defaults;
        let solid = self.solid_mut(id)?;
        solid.kind = solid.kind.convert_to(shape_type, &defaults);
        Ok(())
    }

    /// Merges parameter edits into a solid. Fields its kind does not use are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the solid unchanged, if the solid is missing
    /// or any given value is not a positive finite number.
    pub fn update_params(&mut self, id: SolidId, patch: &ShapeParams) -> Result<()> {
        patch.validate()?;
        let defaults = self.defaults;
        let solid = self.solid_mut(id)?;
        let mut params = solid.kind.params();
        params.merge(patch);
        solid.kind = params.resolve(solid.kind.shape_type(), &defaults);
        Ok(())
    }

    /// Moves a solid, keeping any rotation or scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the scene.
    pub fn set_position(&mut self, id: SolidId, position: Point3) -> Result<()> {
        let solid = self.solid_mut(id)?;
        solid.transform = solid.transform.with_translation(position.coords);
        Ok(())
    }

    /// Replaces a solid's full world transform.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the scene.
    pub fn set_transform(&mut self, id: SolidId, transform: Transform) -> Result<()> {
        self.solid_mut(id)?.transform = transform;
        Ok(())
    }

    /// Renames a solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the scene.
    pub fn set_label(&mut self, id: SolidId, label: impl Into<String>) -> Result<()> {
        self.solid_mut(id)?.label = label.into();
        Ok(())
    }

    /// Changes a solid's display colour.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the scene.
    pub fn set_color(&mut self, id: SolidId, color: impl Into<String>) -> Result<()> {
        self.solid_mut(id)?.color = color.into();
        Ok(())
    }

    /// Tessellates every solid and pairs it with its world transform, in
    /// scene order.
    ///
    /// A solid the catalog cannot tessellate is logged and yields an empty
    /// mesh, so it contributes nothing to an export.
    #[must_use]
    pub fn render_solids(&self) -> Vec<RenderSolid> {
        self.iter()
            .map(|(id, data)| {
                let mesh = TessellateSolid::new(data.kind, self.resolution)
                    .execute()
                    .unwrap_or_else(|err| {
                        warn!(?id, label = %data.label, %err, "solid could not be tessellated");
                        TriangleMesh::default()
                    });
                RenderSolid::new(id, mesh, data.transform)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::InterpretError;

    struct Canned(&'static str);

    impl ShapeInterpreter for Canned {
        fn interpret(
            &self,
            _prompt: &str,
            _image: Option<&ImagePayload>,
        ) -> std::result::Result<ShapeRequest, InterpretError> {
            ShapeRequest::from_json(self.0)
        }
    }

    #[test]
    fn workpiece_scene_starts_selected() {
        let scene = Scene::with_workpiece();
        assert_eq!(scene.len(), 1);
        let (_, solid) = scene.selected_solid().unwrap();
        assert_eq!(solid.label, "Workpiece Base");
        assert_eq!(solid.position(), Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn add_part_labels_by_count() {
        let mut scene = Scene::with_workpiece();
        let id = scene.add_part();
        let solid = scene.solid(id).unwrap();
        assert_eq!(solid.label, "Part 2");
        assert_eq!(
            solid.kind,
            SolidKind::Box {
                width: 10.0,
                height: 10.0,
                depth: 10.0
            }
        );
        assert_eq!(scene.selected(), Some(id));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut scene = Scene::new();
        let a = scene.add_part();
        let b = scene.add_part();
        let c = scene.add_part();
        scene.remove(b).unwrap();
        let d = scene.add_part();
        let ids: Vec<_> = scene.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c, d]);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut scene = Scene::new();
        let a = scene.add_part();
        scene.remove(a).unwrap();
        let b = scene.add_part();
        assert_ne!(a, b);
        assert!(matches!(
            scene.solid(a),
            Err(SceneError::SolidNotFound(id)) if id == a
        ));
    }

    #[test]
    fn removing_selected_falls_back_to_first() {
        let mut scene = Scene::new();
        let a = scene.add_part();
        let b = scene.add_part();
        assert_eq!(scene.selected(), Some(b));
        scene.remove(b).unwrap();
        assert_eq!(scene.selected(), Some(a));
        scene.remove(a).unwrap();
        assert_eq!(scene.selected(), None);
        assert!(scene.is_empty());
    }

    #[test]
    fn removing_unselected_keeps_selection() {
        let mut scene = Scene::new();
        let a = scene.add_part();
        let b = scene.add_part();
        scene.remove(a).unwrap();
        assert_eq!(scene.selected(), Some(b));
    }

    #[test]
    fn set_kind_keeps_shared_dimensions() {
        let mut scene = Scene::new();
        let id = scene.add_part();
        scene.set_kind(id, ShapeType::Cylinder).unwrap();
        assert_eq!(
            scene.solid(id).unwrap().kind,
            SolidKind::Cylinder {
                radius: 5.0,
                height: 10.0
            }
        );
        scene.set_kind(id, ShapeType::Torus).unwrap();
        assert_eq!(
            scene.solid(id).unwrap().kind,
            SolidKind::Torus {
                radius: 5.0,
                tube: 2.0
            }
        );
    }

    #[test]
    fn update_params_merges_recognized_fields() {
        let mut scene = Scene::new();
        let id = scene.add_part();
        scene
            .update_params(
                id,
                &ShapeParams {
                    depth: Some(3.0),
                    radius: Some(8.0),
                    ..ShapeParams::default()
                },
            )
            .unwrap();
        assert_eq!(
            scene.solid(id).unwrap().kind,
            SolidKind::Box {
                width: 10.0,
                height: 10.0,
                depth: 3.0
            }
        );
    }

    #[test]
    fn update_params_rejects_non_positive() {
        let mut scene = Scene::new();
        let id = scene.add_part();
        let before = scene.solid(id).unwrap().kind;
        let err = scene
            .update_params(
                id,
                &ShapeParams {
                    width: Some(-2.0),
                    ..ShapeParams::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            SimpaadError::Scene(SceneError::InvalidParameter { name: "width", .. })
        ));
        assert_eq!(scene.solid(id).unwrap().kind, before);
    }

    #[test]
    fn set_position_keeps_rotation() {
        let mut scene = Scene::new();
        let id = scene.add_part();
        let rotation =
            crate::math::UnitQuaternion::from_scaled_axis(crate::math::Vector3::y() * 0.5);
        scene
            .set_transform(id, Transform::identity().with_rotation(rotation))
            .unwrap();
        scene.set_position(id, Point3::new(1.0, 2.0, 3.0)).unwrap();
        let t = scene.solid(id).unwrap().transform;
        assert_eq!(t.position(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(*t.rotation(), rotation);
    }

    #[test]
    fn interpreted_shape_uses_defaults_and_label() {
        let mut scene = Scene::new();
        let id = scene
            .interpret_and_add(
                &Canned(r#"{"type":"Cylinder","params":{"radius":3},"label":"Peg"}"#),
                "a peg",
                None,
            )
            .unwrap();
        let solid = scene.solid(id).unwrap();
        assert_eq!(
            solid.kind,
            SolidKind::Cylinder {
                radius: 3.0,
                height: 10.0
            }
        );
        assert_eq!(solid.label, "Peg");
        assert_eq!(solid.position(), Point3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn interpreted_shape_without_label_is_synthesized() {
        let mut scene = Scene::new();
        let id = scene
            .interpret_and_add(&Canned(r#"{"type":"sphere","params":{}}"#), "ball", None)
            .unwrap();
        assert_eq!(scene.solid(id).unwrap().label, SYNTHESIZED_LABEL);
    }

    #[test]
    fn failed_interpretation_leaves_scene_unchanged() {
        let mut scene = Scene::with_workpiece();
        for response in ["{}", r#"{"type":"pyramid"}"#, "not json"] {
            assert!(scene
                .interpret_and_add(&Canned(response), "???", None)
                .is_err());
        }
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn render_solids_follow_scene_order() {
        let mut scene = Scene::with_workpiece();
        let sphere = scene.add(SolidData::new(
            SolidKind::Sphere { radius: 2.0 },
            Point3::new(4.0, 0.0, 0.0),
            "ball",
        ));
        let solids = scene.render_solids();
        assert_eq!(solids.len(), 2);
        assert_eq!(solids[0].mesh.triangle_count(), 12);
        assert_eq!(solids[1].id, sphere);
        assert_eq!(solids[1].mesh.triangle_count(), 1984);
        assert_eq!(solids[1].transform.position(), Point3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn untessellatable_solid_renders_empty() {
        let mut scene = Scene::new();
        scene.add(SolidData::new(
            SolidKind::Sphere { radius: 0.0 },
            Point3::origin(),
            "flat",
        ));
        let solids = scene.render_solids();
        assert_eq!(solids.len(), 1);
        assert!(solids[0].mesh.is_empty());
    }
}
