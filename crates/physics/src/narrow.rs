//! Narrow-phase collider tests.
//!
//! Every test reduces to a [`Contact`] with the normal pointing from A to B.
//! Pairs whose bounding boxes miss are rejected before any detailed math.

use glam::Vec2;

use corridor_common::Aabb;

use crate::body::{Collider, RigidBody};
use crate::contact::Contact;

/// Degenerate-distance floor below which centers count as coincident.
const COINCIDENT: f32 = 1e-6;

/// World-space bounding box of a body's collider.
pub fn body_aabb(body: &RigidBody) -> Aabb {
    Aabb::from_center(body.position, body.collider().half_extents(body.scale()))
}

/// Full narrow-phase dispatch for a pair. `None` when separated.
pub fn collide(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    if !body_aabb(a).overlaps(&body_aabb(b)) {
        return None;
    }
    match (a.collider(), b.collider()) {
        (Collider::Circle { radius: ra }, Collider::Circle { radius: rb }) => circle_circle(
            a.position,
            ra * a.scale(),
            b.position,
            rb * b.scale(),
        ),
        (Collider::Circle { radius }, Collider::Rect { .. }) => circle_rect(
            a.position,
            radius * a.scale(),
            b.position,
            b.collider().half_extents(b.scale()),
        ),
        (Collider::Rect { .. }, Collider::Circle { radius }) => circle_rect(
            b.position,
            radius * b.scale(),
            a.position,
            a.collider().half_extents(a.scale()),
        )
        .map(Contact::flipped),
        (Collider::Rect { .. }, Collider::Rect { .. }) => rect_rect(
            a.position,
            a.collider().half_extents(a.scale()),
            b.position,
            b.collider().half_extents(b.scale()),
        ),
    }
}

fn circle_circle(pa: Vec2, ra: f32, pb: Vec2, rb: f32) -> Option<Contact> {
    let delta = pb - pa;
    let radius_sum = ra + rb;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius_sum * radius_sum {
        return None;
    }
    let dist = dist_sq.sqrt();
    // Coincident centers have no meaningful direction; fall back to +X so
    // resolution still separates the pair.
    let normal = if dist > COINCIDENT { delta / dist } else { Vec2::X };
    Some(Contact {
        normal,
        penetration: radius_sum - dist,
        point: pa + normal * ra,
    })
}

fn circle_rect(circle_pos: Vec2, radius: f32, rect_pos: Vec2, half: Vec2) -> Option<Contact> {
    let aabb = Aabb::from_center(rect_pos, half);
    let closest = aabb.clamp_point(circle_pos);
    let delta = closest - circle_pos;
    let dist_sq = delta.length_squared();

    if dist_sq > COINCIDENT * COINCIDENT {
        let dist = dist_sq.sqrt();
        if dist >= radius {
            return None;
        }
        Some(Contact {
            normal: delta / dist,
            penetration: radius - dist,
            point: closest,
        })
    } else {
        // Center is inside the rectangle: separate along the axis with the
        // shallowest face distance.
        let offset = circle_pos - rect_pos;
        let face_x = half.x - offset.x.abs();
        let face_y = half.y - offset.y.abs();
        if face_x < face_y {
            let side = if offset.x >= 0.0 { 1.0 } else { -1.0 };
            Some(Contact {
                normal: Vec2::new(-side, 0.0),
                penetration: face_x + radius,
                point: Vec2::new(rect_pos.x + side * half.x, circle_pos.y),
            })
        } else {
            let side = if offset.y >= 0.0 { 1.0 } else { -1.0 };
            Some(Contact {
                normal: Vec2::new(0.0, -side),
                penetration: face_y + radius,
                point: Vec2::new(circle_pos.x, rect_pos.y + side * half.y),
            })
        }
    }
}

fn rect_rect(pa: Vec2, half_a: Vec2, pb: Vec2, half_b: Vec2) -> Option<Contact> {
    let delta = pb - pa;
    let overlap_x = half_a.x + half_b.x - delta.x.abs();
    let overlap_y = half_a.y + half_b.y - delta.y.abs();
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    // Separate along the axis with the smaller overlap.
    let point = overlap_center(pa, half_a, pb, half_b);
    if overlap_x < overlap_y {
        let side = if delta.x >= 0.0 { 1.0 } else { -1.0 };
        Some(Contact {
            normal: Vec2::new(side, 0.0),
            penetration: overlap_x,
            point,
        })
    } else {
        let side = if delta.y >= 0.0 { 1.0 } else { -1.0 };
        Some(Contact {
            normal: Vec2::new(0.0, side),
            penetration: overlap_y,
            point,
        })
    }
}

/// Center of the overlapping region of two boxes.
fn overlap_center(pa: Vec2, half_a: Vec2, pb: Vec2, half_b: Vec2) -> Vec2 {
    let min = Vec2::new(
        (pa.x - half_a.x).max(pb.x - half_b.x),
        (pa.y - half_a.y).max(pb.y - half_b.y),
    );
    let max = Vec2::new(
        (pa.x + half_a.x).min(pb.x + half_b.x),
        (pa.y + half_a.y).min(pb.y + half_b.y),
    );
    (min + max) * 0.5
}
