// Instance registry
//
// Owns every widget and the theme bus they were built with. Theme changes,
// explicit or from the system, fan out to all widgets in one call.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{WidgetEvent, WidgetInstance};
use crate::app::config::RemyConfig;
use crate::theme::{ThemeBus, ThemeOverride};

pub struct InstanceRegistry {
    bus: ThemeBus,
    instances: Vec<WidgetInstance>,
}

impl InstanceRegistry {
    pub fn new(bus: ThemeBus) -> Self {
        Self {
            bus,
            instances: Vec::new(),
        }
    }

    pub fn bus(&self) -> &ThemeBus {
        &self.bus
    }

    /// Build a widget on this registry's bus and register it
    pub fn spawn(&mut self, config: RemyConfig, now: Instant) -> usize {
        self.spawn_with_rng(config, StdRng::from_entropy(), now)
    }

    /// `spawn` with a caller-supplied blink jitter source
    pub fn spawn_with_rng(&mut self, config: RemyConfig, rng: StdRng, now: Instant) -> usize {
        let id = self.instances.len();
        let widget = WidgetInstance::new(id, config, self.bus.clone(), rng, now);
        debug!(widget = id, theme = %widget.theme(), "Widget registered");
        self.instances.push(widget);
        id
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn get(&self, id: usize) -> Option<&WidgetInstance> {
        self.instances.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut WidgetInstance> {
        self.instances.get_mut(id)
    }

    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = &WidgetInstance> {
        self.instances.iter()
    }

    /// Deliver `event` to every widget, in registration order
    pub fn dispatch_all(&mut self, event: WidgetEvent) {
        for widget in &mut self.instances {
            widget.dispatch(event);
        }
    }

    /// Set or clear the document theme, then notify every widget
    pub fn broadcast_theme_override(&mut self, theme_override: ThemeOverride) {
        info!(theme = theme_override.label(), "Theme override");
        self.bus.set_document_theme(theme_override.attribute());
        self.dispatch_all(WidgetEvent::ThemeChanged);
    }

    /// Record a system preference reading; notifies widgets when it flipped
    ///
    /// Widgets are notified even under an explicit override, where the
    /// notification changes nothing.
    pub fn system_preference_changed(&mut self, prefers_dark: bool) -> bool {
        if !self.bus.set_system_prefers_dark(prefers_dark) {
            return false;
        }
        debug!(dark = prefers_dark, "Broadcasting system theme change");
        self.dispatch_all(WidgetEvent::ThemeChanged);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Palette, Theme};
    use crate::widget::Mode;

    fn registry(count: usize, system_dark: bool) -> InstanceRegistry {
        let mut registry = InstanceRegistry::new(ThemeBus::new(system_dark));
        let now = Instant::now();
        for seed in 0..count as u64 {
            registry.spawn_with_rng(RemyConfig::default(), StdRng::seed_from_u64(seed), now);
        }
        registry
    }

    #[test]
    fn test_spawn_assigns_ids_in_order() {
        let registry = registry(3, false);
        assert_eq!(registry.len(), 3);
        let ids: Vec<usize> = registry.iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn test_broadcast_reaches_every_instance() {
        let mut registry = registry(3, false);
        registry.broadcast_theme_override(ThemeOverride::Dark);

        assert_eq!(registry.bus().document_theme().as_deref(), Some("dark"));
        for widget in registry.iter() {
            assert_eq!(widget.theme(), Theme::Dark);
            assert_eq!(widget.color(), Palette::dark().follow_color);
        }

        registry.broadcast_theme_override(ThemeOverride::Auto);
        assert_eq!(registry.bus().document_theme(), None);
        assert!(registry.iter().all(|w| w.theme() == Theme::Light));
    }

    #[test]
    fn test_broadcast_respects_each_mode() {
        let mut registry = registry(2, false);
        if let Some(widget) = registry.get_mut(1) {
            widget.set_mode(Mode::Idle);
        }

        registry.broadcast_theme_override(ThemeOverride::Dark);
        assert_eq!(registry.get(0).map(|w| w.color()), Some(Palette::dark().follow_color));
        assert_eq!(registry.get(1).map(|w| w.color()), Some(Palette::dark().idle_color));
    }

    #[test]
    fn test_system_change_follows_preference() {
        let mut registry = registry(2, false);
        assert!(registry.system_preference_changed(true));
        assert!(registry.iter().all(|w| w.theme() == Theme::Dark));

        // Same reading again is not a change
        assert!(!registry.system_preference_changed(true));
    }

    #[test]
    fn test_explicit_override_wins_over_system_change() {
        let mut registry = registry(2, false);
        registry.broadcast_theme_override(ThemeOverride::Light);

        assert!(registry.system_preference_changed(true));
        assert!(registry.iter().all(|w| w.theme() == Theme::Light));

        // Back to auto: the stored system preference applies
        registry.broadcast_theme_override(ThemeOverride::Auto);
        assert!(registry.iter().all(|w| w.theme() == Theme::Dark));
    }
}
