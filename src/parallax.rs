use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info};

use crate::anchors::scroll_to_anchor;
use crate::fallback::{apply_fallback, inspect_layer, LayerImage};
use crate::layers::{apply_transforms, sync_heights, Layers};
use crate::listeners::{EventKind, Listeners, Target};
use crate::{
    Config, Event, ImageLoader, ImageOutcome, Input, Output, ParallaxError, Probe, ProbeId,
    Surface,
};

/// Parallax effect bound to one page.
///
/// Created once when page is ready, see [`Parallax::setup`]. Element handles are acquired
/// at setup and held until the controller is dropped.
pub struct Parallax<E> {
    config: Config,
    container: E,
    header: E,
    layers: Layers<E>,
    /// Same page links and their `href`.
    anchors: HashMap<E, String>,
    listeners: Listeners<E>,
    probes: HashMap<ProbeId, PendingProbe<E>>,
    probes_issued: usize,
}

#[derive(Debug)]
struct PendingProbe<E> {
    layer: E,
    url: String,
}

impl<E: Copy + Eq + Hash + Debug> Parallax<E> {
    /// Binds parallax effect to the page: syncs layer heights, binds event listeners
    /// and starts background image probes.
    pub fn setup<S, L>(
        surface: &mut S,
        loader: &mut L,
        config: Config,
    ) -> Result<(Self, Output<E>), ParallaxError>
    where
        S: Surface<Element = E>,
        L: ImageLoader,
    {
        config.validate()?;
        let selectors = &config.selectors;
        let container = require(surface, &selectors.container)?;
        let header = require(surface, &selectors.header)?;
        let layers = Layers {
            back: require(surface, &selectors.back)?,
            base: require(surface, &selectors.base)?,
            foreground: require(surface, &selectors.foreground)?,
        };
        let mut anchors = HashMap::new();
        for anchor in surface.query_all(&selectors.anchor)? {
            let href = surface.attribute(anchor, "href").unwrap_or_default();
            anchors.insert(anchor, href);
        }
        let groups = surface.query_all(&selectors.layer)?;

        let mut listeners = Listeners::new();
        listeners.bind(Target::Window, EventKind::Resize);
        listeners.bind(Target::Element(container), EventKind::Scroll);
        for anchor in anchors.keys() {
            listeners.bind(Target::Element(*anchor), EventKind::Click);
        }

        let mut parallax = Self {
            config,
            container,
            header,
            layers,
            anchors,
            listeners,
            probes: HashMap::new(),
            probes_issued: 0,
        };
        let mut output = Output::new();
        sync_heights(surface, &parallax.layers);
        for layer in groups {
            parallax.probe_layer(surface, loader, layer, &mut output);
        }
        info!(
            "parallax bound, {} anchors, {} image probes",
            parallax.anchors.len(),
            parallax.probes.len()
        );
        Ok((parallax, output))
    }

    /// Resolves finished image probes, then handles input events in order.
    pub fn update<S, L>(&mut self, surface: &mut S, loader: &mut L, input: Input<E>) -> Output<E>
    where
        S: Surface<Element = E>,
        L: ImageLoader,
    {
        let mut output = Output::new();
        for (probe, outcome) in loader.poll() {
            self.resolve_probe(surface, probe, outcome, &mut output);
        }
        for event in input.events {
            self.handle_event(surface, event, &mut output);
        }
        output
    }

    /// Unbinds all event listeners and forgets pending image probes.
    pub fn dispose(&mut self) {
        let listeners = self.listeners.unbind_all();
        let probes = self.probes.len();
        self.probes.clear();
        debug!("parallax disposed, {listeners} listeners unbound, {probes} probes dropped");
    }

    pub fn is_disposed(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn pending_probes(&self) -> usize {
        self.probes.len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn handle_event<S>(&self, surface: &mut S, event: Event<E>, output: &mut Output<E>)
    where
        S: Surface<Element = E>,
    {
        match event {
            Event::Resize(viewport) => {
                if self.listeners.is_bound(Target::Window, EventKind::Resize) {
                    debug!("viewport resized to {viewport:?}");
                    sync_heights(surface, &self.layers);
                }
            }
            Event::Scroll(target) => {
                if self
                    .listeners
                    .is_bound(Target::Element(target), EventKind::Scroll)
                {
                    let scroll = surface.scroll_top(self.container);
                    apply_transforms(
                        surface,
                        &self.layers,
                        &self.config.back,
                        &self.config.base,
                        scroll,
                    );
                }
            }
            Event::Click(target) => {
                if !self
                    .listeners
                    .is_bound(Target::Element(target), EventKind::Click)
                {
                    return;
                }
                let href = match self.anchors.get(&target) {
                    Some(href) => href,
                    None => return,
                };
                output.prevented.push(target);
                scroll_to_anchor(
                    surface,
                    self.container,
                    self.header,
                    href,
                    self.config.anchor_scroll,
                );
            }
        }
    }

    fn probe_layer<S, L>(&mut self, surface: &mut S, loader: &mut L, layer: E, output: &mut Output<E>)
    where
        S: Surface<Element = E>,
        L: ImageLoader,
    {
        match inspect_layer(surface, layer) {
            LayerImage::Missing => {
                apply_fallback(surface, layer, &self.config.fallback_color);
                output.warn(format!(
                    "parallax layer has no valid background image URL, using fallback color for {}",
                    surface.describe(layer)
                ));
            }
            LayerImage::Declared(url) => {
                let id = ProbeId(self.probes_issued);
                self.probes_issued += 1;
                let probe = Probe {
                    id,
                    url: url.clone(),
                };
                self.probes.insert(id, PendingProbe { layer, url });
                output.probes.push(probe.clone());
                loader.request(probe);
            }
        }
    }

    fn resolve_probe<S>(
        &mut self,
        surface: &mut S,
        probe: ProbeId,
        outcome: ImageOutcome,
        output: &mut Output<E>,
    ) where
        S: Surface<Element = E>,
    {
        let pending = match self.probes.remove(&probe) {
            Some(pending) => pending,
            None => {
                debug!("image probe {probe} is not pending, outcome {outcome:?} ignored");
                return;
            }
        };
        match outcome {
            // the declared image is already rendered by the surface
            ImageOutcome::Loaded => debug!("parallax layer image {} loaded", pending.url),
            ImageOutcome::Failed => {
                apply_fallback(surface, pending.layer, &self.config.fallback_color);
                output.error(format!(
                    "failed to load image for parallax layer: {}, using fallback color",
                    pending.url
                ));
            }
        }
    }
}

fn require<S: Surface>(surface: &S, selector: &str) -> Result<S::Element, ParallaxError> {
    surface
        .query(selector)?
        .ok_or_else(|| ParallaxError::ElementNotFound(selector.to_string()))
}
