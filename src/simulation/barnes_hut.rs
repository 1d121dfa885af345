//! Barnes-Hut octree for approximate gravitational force evaluation.
//!
//! Replaces the exact `O(N^2)` all-pairs summation with an `O(N log N)`
//! approximation: the simulation volume is recursively split into octants,
//! every node aggregates the total mass and center of mass of its subtree,
//! and a distant node is treated as a single point mass when its angular
//! size passes the opening test `size / distance < theta`.
//!
//! Nodes live in a flat arena (`Vec<Node>`) and address each other by index.
//! A tree is built per force pass from the current body positions and
//! dropped wholesale afterwards; there is no per-node teardown.

use log::{debug, warn};

use crate::simulation::body::{BodySet, Vec3};
use crate::simulation::gravity::force_between;

/// Default opening-angle threshold. Smaller values open more nodes and
/// approach the exact pairwise sum.
pub const DEFAULT_THETA: f64 = 1.0;

// Two distinct f64 positions always separate before this depth; reaching it
// means the bodies are coincident for force purposes.
const MAX_DEPTH: usize = 64;

/// Child octants of a node, split at the center of its cuboid.
///
/// `U`/`L` is the upper/lower half along z, `N`/`S` north/south along y,
/// `E`/`W` east/west along x. A position exactly on a split plane always
/// goes to the east/north/upper side, so octant assignment is deterministic
/// across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Octant {
    Lsw,
    Lse,
    Lnw,
    Lne,
    Usw,
    Use,
    Unw,
    Une,
}

impl Octant {
    /// Octant of `position` relative to `center`.
    pub fn of(position: &Vec3, center: &Vec3) -> Self {
        let mut index = 0;
        if position.x >= center.x {
            index |= 1;
        }
        if position.y >= center.y {
            index |= 2;
        }
        if position.z >= center.z {
            index |= 4;
        }
        Self::from_index(index)
    }

    /// Index into a node's `children` array: bit 0 east, bit 1 north,
    /// bit 2 upper.
    pub fn index(self) -> usize {
        match self {
            Octant::Lsw => 0,
            Octant::Lse => 1,
            Octant::Lnw => 2,
            Octant::Lne => 3,
            Octant::Usw => 4,
            Octant::Use => 5,
            Octant::Unw => 6,
            Octant::Une => 7,
        }
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => Octant::Lsw,
            1 => Octant::Lse,
            2 => Octant::Lnw,
            3 => Octant::Lne,
            4 => Octant::Usw,
            5 => Octant::Use,
            6 => Octant::Unw,
            _ => Octant::Une,
        }
    }

    /// Bounding box of this octant within the parent box.
    fn bounds(self, parent_min: &Vec3, parent_max: &Vec3) -> (Vec3, Vec3) {
        let center = (parent_min + parent_max) * 0.5;
        let index = self.index();

        let mut min = *parent_min;
        let mut max = *parent_max;

        if index & 1 == 0 {
            max.x = center.x;
        } else {
            min.x = center.x;
        }
        if index & 2 == 0 {
            max.y = center.y;
        } else {
            min.y = center.y;
        }
        if index & 4 == 0 {
            max.z = center.z;
        } else {
            min.z = center.z;
        }

        (min, max)
    }
}

/// One axis-aligned cuboid region of space.
///
/// A node without children is a leaf holding at most one body index, except
/// at the depth bound where `bodies` keeps a clump of coincident occupants.
/// `mass` and `com` are filled by the bottom-up aggregation pass once all
/// bodies are inserted.
struct Node {
    mass: f64,
    com: Vec3,
    min: Vec3,
    max: Vec3,
    children: [Option<usize>; 8],
    bodies: Vec<usize>,
}

impl Node {
    fn empty(min: Vec3, max: Vec3) -> Self {
        Self {
            mass: 0.0,
            com: Vec3::zeros(),
            min,
            max,
            children: [None; 8],
            bodies: Vec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }
}

/// A Barnes-Hut octree over the current positions of a body set.
///
/// The tree has no identity beyond one force pass: build it, query
/// [`BarnesHutTree::force_on`] for every body, drop it.
pub struct BarnesHutTree {
    nodes: Vec<Node>,
    root: usize,
}

impl BarnesHutTree {
    /// Build the tree over `bounds` from the current body positions.
    ///
    /// Bodies outside `bounds` are silently skipped; callers that want every
    /// body included should pass [`enclosing_bounds`]. The mass distribution
    /// is aggregated bottom-up before returning, so the tree is immediately
    /// queryable.
    pub fn build(bodies: &BodySet, bounds: (Vec3, Vec3)) -> Self {
        let (min, max) = bounds;
        let mut tree = Self {
            nodes: vec![Node::empty(min, max)],
            root: 0,
        };

        for (i, body) in bodies.iter().enumerate() {
            if !contains(&min, &max, &body.position) {
                debug!("body {:?} lies outside the tree bounds, skipped", body.name);
                continue;
            }
            tree.insert(tree.root, i, bodies, 0);
        }

        tree.aggregate(bodies, tree.root);
        tree
    }

    /// Net gravitational force on the body at index `target`, to the
    /// accuracy selected by `theta`.
    pub fn force_on(&self, target: usize, bodies: &BodySet, theta: f64) -> Vec3 {
        let body = &bodies.as_slice()[target];
        let mut out = Vec3::zeros();
        self.accumulate(self.root, target, body.position, body.mass(), bodies, theta, &mut out);
        out
    }

    /// Aggregate mass of everything actually inserted.
    pub fn total_mass(&self) -> f64 {
        self.nodes[self.root].mass
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Place one body, splitting an occupied leaf by pushing its resident one
    /// level deeper until the two separate. At `MAX_DEPTH` the leaf stops
    /// splitting and keeps every arrival as one coincident clump.
    fn insert(&mut self, node_idx: usize, body_idx: usize, bodies: &BodySet, depth: usize) {
        if self.nodes[node_idx].is_leaf() {
            if self.nodes[node_idx].bodies.is_empty() {
                self.nodes[node_idx].bodies.push(body_idx);
                return;
            }

            if depth >= MAX_DEPTH {
                warn!(
                    "octree depth bound reached; merging {:?} into a coincident clump",
                    bodies.as_slice()[body_idx].name
                );
                self.nodes[node_idx].bodies.push(body_idx);
                return;
            }

            // Push the resident a level down, turning this leaf into an
            // internal node, then fall through to place the newcomer.
            let residents = std::mem::take(&mut self.nodes[node_idx].bodies);
            for resident in residents {
                self.descend(node_idx, resident, bodies, depth);
            }
        }

        self.descend(node_idx, body_idx, bodies, depth);
    }

    /// Forward a body into its child octant, creating the child on demand.
    fn descend(&mut self, node_idx: usize, body_idx: usize, bodies: &BodySet, depth: usize) {
        // Copy the box out by value so no borrow is held across the recursion.
        let min = self.nodes[node_idx].min;
        let max = self.nodes[node_idx].max;
        let center = (min + max) * 0.5;

        let octant = Octant::of(&bodies.as_slice()[body_idx].position, &center);
        let child_idx = match self.nodes[node_idx].children[octant.index()] {
            Some(idx) => idx,
            None => {
                let (cmin, cmax) = octant.bounds(&min, &max);
                let idx = self.nodes.len();
                self.nodes.push(Node::empty(cmin, cmax));
                self.nodes[node_idx].children[octant.index()] = Some(idx);
                idx
            }
        };

        self.insert(child_idx, body_idx, bodies, depth + 1);
    }

    /// Bottom-up mass distribution pass: a leaf aggregates its occupants, an
    /// internal node the mass-weighted sum over its non-empty children.
    fn aggregate(&mut self, bodies: &BodySet, node_idx: usize) {
        let (mut mass, mut com) = {
            let node = &self.nodes[node_idx];
            let mut m = 0.0;
            let mut c = Vec3::zeros();
            for &b in &node.bodies {
                let body = &bodies.as_slice()[b];
                m += body.mass();
                c += body.position * body.mass();
            }
            (m, c)
        };

        let children = self.nodes[node_idx].children;
        for child_idx in children.into_iter().flatten() {
            self.aggregate(bodies, child_idx);
            let child = &self.nodes[child_idx];
            if child.mass > 0.0 {
                mass += child.mass;
                com += child.com * child.mass;
            }
        }

        if mass > 0.0 {
            com /= mass;
        }

        let node = &mut self.nodes[node_idx];
        node.mass = mass;
        node.com = com;
    }

    fn accumulate(
        &self,
        node_idx: usize,
        target: usize,
        position: Vec3,
        mass: f64,
        bodies: &BodySet,
        theta: f64,
        out: &mut Vec3,
    ) {
        let node = &self.nodes[node_idx];
        if node.mass == 0.0 {
            return;
        }

        // Leaf: exact pairwise interaction with every occupant but the
        // target itself. Zero separation means the duplicate-position
        // invariant was bypassed upstream; the contribution is skipped
        // rather than letting NaN poison the tick.
        if node.is_leaf() {
            for &b in &node.bodies {
                if b == target {
                    continue;
                }
                let other = &bodies.as_slice()[b];
                match force_between(position, mass, other.position, other.mass()) {
                    Ok(f) => *out += f,
                    Err(_) => warn!(
                        "zero separation between {:?} and {:?}, contribution skipped",
                        bodies.as_slice()[target].name,
                        other.name
                    ),
                }
            }
            return;
        }

        // Internal node: treat as one point mass at its center of mass when
        // it subtends a small enough angle, otherwise open it.
        let extent = node.max - node.min;
        let size = extent.x.max(extent.y).max(extent.z);
        let dist = (node.com - position).norm();

        if dist > 0.0 && size / dist < theta {
            if let Ok(f) = force_between(position, mass, node.com, node.mass) {
                *out += f;
            }
            return;
        }

        for child_idx in node.children.iter().flatten() {
            self.accumulate(*child_idx, target, position, mass, bodies, theta, out);
        }
    }
}

/// Cubic bounding box enclosing every body, with a small margin.
///
/// The box is expanded to a cube so the node size used by the opening test
/// is well defined on every axis.
pub fn enclosing_bounds(bodies: &BodySet) -> (Vec3, Vec3) {
    if bodies.is_empty() {
        return (Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
    }

    let mut min = Vec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut max = Vec3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

    for body in bodies {
        min = min.inf(&body.position);
        max = max.sup(&body.position);
    }

    let center = (min + max) * 0.5;
    let extent = (max - min) * 0.5;
    // At least one meter of half-extent keeps the box non-degenerate when
    // all bodies share a single point.
    let half = (extent.x.max(extent.y).max(extent.z) * 1.01).max(1.0);
    let half = Vec3::new(half, half, half);

    (center - half, center + half)
}

fn contains(min: &Vec3, max: &Vec3, p: &Vec3) -> bool {
    p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y && p.z >= min.z && p.z <= max.z
}
