//! Circle packing of equally weighted leaves into one enclosing circle per group.
//!
//! Siblings are placed with the front-chain algorithm (each new circle tangent to two
//! circles on the current front, choosing the pair closest to the origin), and the
//! enclosing circle is found with a randomized incremental (Welzl-style) search. The
//! random sequence comes from a fixed-seed LCG so layouts are reproducible.

use crate::{
    foundation::core::Point,
    layout::config::LayoutConfig,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    pub fn center(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Linear congruential generator (a = 1664525, c = 1013904223, m = 2^32) seeded with 1.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    pub fn new() -> Self {
        Self { state: 1 }
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = (Self::A * self.state + Self::C) % Self::M;
        self.state as f64 / Self::M as f64
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new()
    }
}

/// A packed group: enclosing circle plus leaf centers in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedGroup {
    pub center: Point,
    pub radius: f64,
    pub leaves: Vec<Point>,
    pub leaf_radius: f64,
}

/// Packs `count` equal leaves and centers the enclosing circle on `anchor`.
///
/// Returns `None` for an empty group.
pub fn pack_group(count: usize, anchor: Point, config: &LayoutConfig) -> Option<PackedGroup> {
    if count == 0 {
        return None;
    }

    let raw_r = config.pack.leaf_value.sqrt();
    let mut circles = vec![Circle::new(0.0, 0.0, raw_r); count];
    let mut rng = Lcg::new();

    // First pass without padding sizes the padding for the second pass.
    let unpadded = pack_siblings(&mut circles, &mut rng);
    let pad = config.pack.padding * unpadded / config.pack.extent;
    for c in &mut circles {
        c.r += pad;
    }
    let enclosing = pack_siblings(&mut circles, &mut rng) + pad;
    for c in &mut circles {
        c.r -= pad;
    }

    // Rescale so every leaf ends up with the configured radius.
    let scale = config.leaf_radius / raw_r;
    let leaves = circles
        .iter()
        .map(|c| Point::new(anchor.x + c.x * scale, anchor.y + c.y * scale))
        .collect();

    Some(PackedGroup {
        center: anchor,
        radius: enclosing * scale,
        leaves,
        leaf_radius: config.leaf_radius,
    })
}

/// Packs sibling circles around the origin and returns the enclosing radius.
///
/// Circles keep their radii; on return the enclosing circle is centered at the origin.
pub fn pack_siblings(circles: &mut [Circle], rng: &mut Lcg) -> f64 {
    let n = circles.len();
    if n == 0 {
        return 0.0;
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return circles[0].r;
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return circles[0].r + circles[1].r;
    }

    let (c0, c1) = (circles[0], circles[1]);
    place(c1, c0, &mut circles[2]);

    // Front chain as a circular doubly linked list over circle indices.
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    let (mut a, mut b) = (0usize, 1usize);
    next[0] = 1;
    prev[2] = 1;
    next[1] = 2;
    prev[0] = 2;
    next[2] = 0;
    prev[1] = 0;

    let mut i = 3;
    'pack: while i < n {
        let (ca, cb) = (circles[a], circles[b]);
        place(ca, cb, &mut circles[i]);
        let c = i;

        let mut j = next[b];
        let mut k = prev[a];
        let mut sj = circles[b].r;
        let mut sk = circles[a].r;
        loop {
            if sj <= sk {
                if intersects(circles[j], circles[c]) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(circles[k], circles[c]) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        prev[c] = a;
        next[c] = b;
        next[a] = c;
        prev[b] = c;
        b = c;

        let mut best = score(circles, &next, a);
        let mut node = next[c];
        while node != b {
            let s = score(circles, &next, node);
            if s < best {
                a = node;
                best = s;
            }
            node = next[node];
        }
        b = next[a];
        i += 1;
    }

    let mut front = vec![circles[b]];
    let mut node = next[b];
    while node != b {
        front.push(circles[node]);
        node = next[node];
    }

    let Some(e) = enclose(&front, rng) else {
        return 0.0;
    };
    for c in circles.iter_mut() {
        c.x -= e.x;
        c.y -= e.y;
    }
    e.r
}

/// Smallest circle enclosing every input circle.
pub fn enclose(circles: &[Circle], rng: &mut Lcg) -> Option<Circle> {
    let mut shuffled = circles.to_vec();
    let mut m = shuffled.len();
    while m > 0 {
        let i = (rng.next_f64() * m as f64) as usize;
        m -= 1;
        shuffled.swap(m, i);
    }

    let mut basis = Vec::<Circle>::new();
    let mut e: Option<Circle> = None;
    let mut i = 0;
    while i < shuffled.len() {
        let p = shuffled[i];
        if e.is_some_and(|e| encloses_weak(e, p)) {
            i += 1;
            continue;
        }
        match extend_basis(&basis, p) {
            Some(b) => {
                basis = b;
                e = Some(enclose_basis(&basis));
                i = 0;
            }
            None => {
                tracing::warn!(
                    circles = circles.len(),
                    "enclosing circle search did not converge"
                );
                break;
            }
        }
    }
    e
}

fn place(b: Circle, a: Circle, c: &mut Circle) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 > 0.0 {
        let a2 = (a.r + c.r).powi(2);
        let b2 = (b.r + c.r).powi(2);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
}

fn intersects(a: Circle, b: Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn score(circles: &[Circle], next: &[usize], node: usize) -> f64 {
    let a = circles[node];
    let b = circles[next[node]];
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}

fn extend_basis(basis: &[Circle], p: Circle) -> Option<Vec<Circle>> {
    if encloses_weak_all(p, basis) {
        return Some(vec![p]);
    }

    for &bi in basis {
        if encloses_not(p, bi) && encloses_weak_all(enclose_basis2(bi, p), basis) {
            return Some(vec![bi, p]);
        }
    }

    for i in 0..basis.len().saturating_sub(1) {
        for j in (i + 1)..basis.len() {
            let (bi, bj) = (basis[i], basis[j]);
            if encloses_not(enclose_basis2(bi, bj), p)
                && encloses_not(enclose_basis2(bi, p), bj)
                && encloses_not(enclose_basis2(bj, p), bi)
                && encloses_weak_all(enclose_basis3(bi, bj, p), basis)
            {
                return Some(vec![bi, bj, p]);
            }
        }
    }
    None
}

fn encloses_not(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: Circle, b: Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|&b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match basis {
        [a] => *a,
        [a, b] => enclose_basis2(*a, *b),
        [a, b, c] => enclose_basis3(*a, *b, *c),
        _ => Circle::new(0.0, 0.0, 0.0),
    }
}

fn enclose_basis2(a: Circle, b: Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = (x21 * x21 + y21 * y21).sqrt();
    Circle::new(
        (a.x + b.x + x21 / l * r21) / 2.0,
        (a.y + b.y + y21 / l * r21) / 2.0,
        (l + a.r + b.r) / 2.0,
    )
}

fn enclose_basis3(a: Circle, b: Circle, c: Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);
    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });
    Circle::new(x1 + xa + xb * r, y1 + ya + yb * r, r)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pack.rs"]
mod tests;
