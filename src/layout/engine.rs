use crate::{
    data::{dataset::Dataset, palette::Palette},
    foundation::{
        core::{Color, Size, VizId},
        error::{MorphError, MorphResult},
    },
    identity::registry::{EntityDescriptor, EntityKey, EntityRegistry},
    layout::{config::LayoutConfig, grid::layout_grid, pack::pack_group},
    scene::scene::{Scene, Shape, ShapeKind, ShapeRole, Stroke, TextAlign},
};

const OUTLINE_FILL_OPACITY: f64 = 0.05;
const OUTLINE_STROKE: Stroke = Stroke {
    color: Color::rgb(0xAA, 0xAA, 0xAA),
    width: 1.0,
    opacity: 0.3,
};
const ENTITY_STROKE: Stroke = Stroke {
    color: Color::WHITE,
    width: 0.3,
    opacity: 0.3,
};

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSummary {
    pub viz: VizId,
    pub groups: usize,
    pub entities: usize,
    pub size: Size,
}

/// Lays out one visualization, draws it into its scene and populates its registry.
///
/// Every drawn species circle is registered once, after its group translation, and the
/// registry's readiness is resolved when the pass finishes.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEngine<'a> {
    config: &'a LayoutConfig,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        self.config
    }

    pub fn render(
        &self,
        dataset: &Dataset,
        scene: &mut Scene,
        registry: &mut EntityRegistry,
        viewport_height: f64,
    ) -> MorphResult<RenderSummary> {
        match scene.viz() {
            VizId::Pack => self.render_pack(dataset, scene, registry, viewport_height),
            VizId::Grid => self.render_grid(dataset, scene, registry),
        }
    }

    #[tracing::instrument(skip(self, dataset, scene, registry), fields(rows = dataset.len()))]
    pub fn render_pack(
        &self,
        dataset: &Dataset,
        scene: &mut Scene,
        registry: &mut EntityRegistry,
        viewport_height: f64,
    ) -> MorphResult<RenderSummary> {
        check_targets(VizId::Pack, scene, registry)?;
        let cfg = self.config;
        let palette = Palette::packing();
        scene.set_size(Size::new(cfg.canvas_width, viewport_height));

        let mut groups = 0;
        for group in dataset.species_groups() {
            let anchor = cfg.anchor_for(&group.name);
            let Some(packed) = pack_group(group.items.len(), anchor, cfg) else {
                continue;
            };
            groups += 1;

            scene.push(
                Shape::circle(
                    packed.center,
                    packed.radius,
                    Color::WHITE,
                    ShapeRole::GroupOutline,
                )
                .with_fill_opacity(OUTLINE_FILL_OPACITY)
                .with_stroke(OUTLINE_STROKE),
            );

            for (item, &position) in group.items.iter().zip(&packed.leaves) {
                let color = palette.fill(&item.mechanism);
                let key = EntityKey::new(item.binomial.as_str());
                let handle = scene.push(
                    Shape::circle(position, packed.leaf_radius, color, ShapeRole::Entity)
                        .with_stroke(ENTITY_STROKE)
                        .for_entity(key.clone()),
                );
                registry.register(
                    key,
                    EntityDescriptor {
                        position,
                        radius: packed.leaf_radius,
                        color,
                        mechanism: item.mechanism.clone(),
                        group: group.name.clone(),
                        handle,
                    },
                );
            }

            let font_px = if group.name.chars().count() >= cfg.pack.compact_label_min_chars {
                cfg.pack.compact_label_font_px
            } else {
                cfg.pack.label_font_px
            };
            scene.push(Shape::label(
                ShapeKind::ArcText {
                    center: packed.center,
                    radius: packed.radius + cfg.pack.label_gap,
                    start_deg: cfg.pack.label_start_deg,
                    end_deg: cfg.pack.label_end_deg,
                    text: group.name.clone(),
                    font_px,
                },
                Color::WHITE,
            ));
        }

        registry.mark_ready();
        tracing::info!(groups, entities = registry.len(), "pack layout rendered");
        Ok(RenderSummary {
            viz: VizId::Pack,
            groups,
            entities: registry.len(),
            size: scene.size(),
        })
    }

    #[tracing::instrument(skip(self, dataset, scene, registry), fields(rows = dataset.len()))]
    pub fn render_grid(
        &self,
        dataset: &Dataset,
        scene: &mut Scene,
        registry: &mut EntityRegistry,
    ) -> MorphResult<RenderSummary> {
        check_targets(VizId::Grid, scene, registry)?;
        let cfg = self.config;
        let palette = Palette::grid();
        let bands = dataset.type_bands();
        let layout = layout_grid(&bands, cfg);
        scene.set_size(layout.size);

        for band in &layout.bands {
            scene.push(Shape::label(
                ShapeKind::Text {
                    anchor: band.label_anchor,
                    text: band.study_type.clone(),
                    font_px: cfg.grid.label_font_px,
                    align: TextAlign::Start,
                },
                Color::WHITE,
            ));
        }

        for cell in &layout.cells {
            let color = palette.fill(&cell.mechanism);
            let key = EntityKey::new(cell.binomial.as_str());
            let handle = scene.push(
                Shape::circle(cell.center, cfg.leaf_radius, color, ShapeRole::Entity)
                    .for_entity(key.clone()),
            );
            registry.register(
                key,
                EntityDescriptor {
                    position: cell.center,
                    radius: cfg.leaf_radius,
                    color,
                    mechanism: cell.mechanism.clone(),
                    group: cell.study_type.clone(),
                    handle,
                },
            );
        }

        registry.mark_ready();
        tracing::info!(
            bands = layout.bands.len(),
            entities = registry.len(),
            "grid layout rendered"
        );
        Ok(RenderSummary {
            viz: VizId::Grid,
            groups: layout.bands.len(),
            entities: registry.len(),
            size: layout.size,
        })
    }
}

fn check_targets(viz: VizId, scene: &Scene, registry: &EntityRegistry) -> MorphResult<()> {
    if scene.viz() != viz || registry.viz() != viz {
        return Err(MorphError::layout(format!(
            "{viz} layout needs a {viz} scene and registry (got scene {}, registry {})",
            scene.viz(),
            registry.viz()
        )));
    }
    if registry.is_ready() {
        return Err(MorphError::layout(format!(
            "{viz} registry was already populated"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
