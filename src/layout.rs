//! Layout assignment
//!
//! Controller specs are templates: one container may be placed in several
//! regions of the strip, each time with its own phase. Compilation turns the
//! spec tree into patterns plus a sizing tree, then assignment resolves every
//! placement into an arena of nodes that own a contiguous LED range.
//!
//! Within one container, fixed widths are served first. The LEDs left over
//! are split per flex unit as `floor(remaining / total_flex)` and the
//! remainder goes to the first child placed with a non-zero flex. When the
//! children do not cover the range in one pass, they are repeated with the
//! phase advanced by `offsetAdjust` until the range is exhausted.

use alloc::vec::Vec;

use crate::{
    bounds::LedRange,
    error::Result,
    pattern::{ColorsPattern, CometPattern, FirePattern, PatternSlot},
    spec::{ContainerSpec, ControllerKind, Sizing},
};

/// Index of a node in the layout arena
pub type NodeId = usize;
/// Index of a pattern in the compiled pattern list
pub type PatternId = usize;

/// Sizing tree mirroring the controller tree, with leaf controllers replaced by pattern ids
#[derive(Debug, Clone)]
pub struct ContainerTemplate {
    children: Vec<Template>,
    offset_adjust: i64,
}

#[derive(Debug, Clone)]
struct Template {
    sizing: Sizing,
    offset: i64,
    kind: TemplateKind,
}

#[derive(Debug, Clone)]
enum TemplateKind {
    Container(ContainerTemplate),
    Pattern(PatternId),
}

/// Result of compiling a spec tree
#[derive(Debug, Clone)]
pub struct Compiled {
    pub root: ContainerTemplate,
    pub patterns: Vec<PatternSlot>,
}

/// Compile a container spec into a template and its patterns
///
/// Each leaf controller gets exactly one pattern, shared by every placement
/// of that controller. Fire patterns without their own seed are seeded from
/// `seed` and their pattern id.
pub fn compile(root: &ContainerSpec, seed: u64) -> Result<Compiled> {
    let mut patterns = Vec::new();
    let root = compile_container(root, seed, &mut patterns)?;
    Ok(Compiled { root, patterns })
}

fn compile_container(
    spec: &ContainerSpec,
    seed: u64,
    patterns: &mut Vec<PatternSlot>,
) -> Result<ContainerTemplate> {
    let children = spec
        .controllers
        .iter()
        .map(|controller| {
            let kind = match &controller.kind {
                ControllerKind::Container(inner) => {
                    TemplateKind::Container(compile_container(inner, seed, patterns)?)
                }
                leaf => {
                    let id = patterns.len();
                    patterns.push(compile_pattern(leaf, seed.wrapping_add(id as u64))?);
                    TemplateKind::Pattern(id)
                }
            };
            Ok(Template {
                sizing: controller.sizing,
                offset: controller.offset,
                kind,
            })
        })
        .collect::<Result<_>>()?;

    Ok(ContainerTemplate {
        children,
        offset_adjust: spec.offset_adjust,
    })
}

fn compile_pattern(kind: &ControllerKind, seed: u64) -> Result<PatternSlot> {
    Ok(match kind {
        ControllerKind::Colors(spec) => PatternSlot::Colors(ColorsPattern::new(spec)?),
        ControllerKind::Comet(spec) => PatternSlot::Comet(CometPattern::new(spec)?),
        ControllerKind::Fire(spec) => {
            PatternSlot::Fire(FirePattern::new(spec.seed.unwrap_or(seed)))
        }
        ControllerKind::Noop | ControllerKind::Container(_) => PatternSlot::Noop,
    })
}

/// A resolved placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub leds: LedRange,
    /// Accumulated phase offset in frames
    pub phase: i64,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Children in assignment order
    Container { children: Vec<NodeId> },
    Pattern(PatternId),
}

/// Statistics collected while assigning a layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Resolved containers, root included
    pub containers: usize,
    /// Resolved pattern placements
    pub placements: usize,
    /// Passes over child sequences
    pub passes: usize,
    /// LEDs no child could claim
    pub unassigned: usize,
}

/// Arena of resolved nodes; the root container is always node 0
#[derive(Debug, Clone)]
pub struct Layout {
    nodes: Vec<Node>,
    stats: LayoutStats,
}

impl Layout {
    pub const ROOT: NodeId = 0;

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Children of a container node, empty for patterns
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id).map(|node| &node.kind) {
            Some(NodeKind::Container { children }) => children,
            _ => &[],
        }
    }

    /// Pattern placements in assignment order
    pub fn placements(&self) -> impl Iterator<Item = (&Node, PatternId)> {
        self.nodes.iter().filter_map(|node| match node.kind {
            NodeKind::Pattern(pattern) => Some((node, pattern)),
            NodeKind::Container { .. } => None,
        })
    }

    pub const fn stats(&self) -> LayoutStats {
        self.stats
    }
}

/// Resolve a compiled container over `leds`
pub fn assign(root: &ContainerTemplate, leds: LedRange) -> Layout {
    let mut assigner = Assigner::default();
    assigner.container(root, leds, 0);
    Layout {
        nodes: assigner.nodes,
        stats: assigner.stats,
    }
}

#[derive(Default)]
struct Assigner {
    nodes: Vec<Node>,
    stats: LayoutStats,
}

impl Assigner {
    fn container(&mut self, template: &ContainerTemplate, leds: LedRange, phase: i64) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            leds,
            phase,
            kind: NodeKind::Container {
                children: Vec::new(),
            },
        });
        self.stats.containers += 1;

        let resolved = self.distribute(template, leds, phase);
        if let NodeKind::Container { children } = &mut self.nodes[id].kind {
            *children = resolved;
        }
        id
    }

    fn distribute(
        &mut self,
        template: &ContainerTemplate,
        leds: LedRange,
        phase: i64,
    ) -> Vec<NodeId> {
        let mut resolved = Vec::new();
        if template.children.is_empty() {
            self.stats.unassigned += leds.count();
            return resolved;
        }

        let mut total_width = 0usize;
        let mut total_flex = 0usize;
        for child in &template.children {
            match child.sizing {
                Sizing::Width(width) => total_width = total_width.saturating_add(width),
                Sizing::Flex(flex) => total_flex = total_flex.saturating_add(flex as usize),
            }
        }

        let remaining = leds.count().saturating_sub(total_width);
        let (flex_unit, mut extra) = if total_flex > 0 {
            let unit = remaining / total_flex;
            (unit, remaining - unit * total_flex)
        } else {
            (0, 0)
        };

        let mut rest = leds;
        let mut pass_phase: i64 = 0;
        while !rest.is_empty() {
            let before = rest.count();

            for child in &template.children {
                if rest.is_empty() {
                    break;
                }
                let size = match child.sizing {
                    Sizing::Width(width) => width,
                    Sizing::Flex(0) => 0,
                    Sizing::Flex(flex) => {
                        let size = (flex as usize).saturating_mul(flex_unit) + extra;
                        extra = 0;
                        size
                    }
                };

                let (slice, tail) = rest.split_prefix(size);
                rest = tail;
                if slice.is_empty() {
                    continue;
                }

                let child_phase = phase.wrapping_add(pass_phase).wrapping_add(child.offset);
                resolved.push(self.place(child, slice, child_phase));
            }

            self.stats.passes += 1;
            if rest.count() == before {
                // Only zero-sized children: nothing will ever claim the rest.
                break;
            }
            pass_phase = pass_phase.wrapping_add(template.offset_adjust);
        }

        self.stats.unassigned += rest.count();
        resolved
    }

    fn place(&mut self, child: &Template, leds: LedRange, phase: i64) -> NodeId {
        match &child.kind {
            TemplateKind::Container(inner) => self.container(inner, leds, phase),
            TemplateKind::Pattern(pattern) => {
                let id = self.nodes.len();
                self.nodes.push(Node {
                    leds,
                    phase,
                    kind: NodeKind::Pattern(*pattern),
                });
                self.stats.placements += 1;
                id
            }
        }
    }
}
