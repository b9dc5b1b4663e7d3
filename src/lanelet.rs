// src/lanelet.rs
//
// Lanelet geometry and the projection of positions onto it.
//
// A lanelet is an atomic road segment with a polyline centerline and a local
// width. Projecting a position yields its arc-length coordinate along the
// centerline, its lateral offset, and the tangent heading at that point — the
// longitudinal reference frame every measure decomposes kinematics into.
//
// A position whose perpendicular foot falls beyond either end of the polyline
// is OUT OF the projection domain. That is a defined outcome (the actor is too
// far away to reason about along this lane), not an error, and it must stay
// distinguishable from a valid projection with zero heading.

use crate::types::{LaneProjection, LaneletId, Vec2};

#[derive(Debug, Clone)]
pub struct Lanelet {
    pub id: LaneletId,
    /// Centerline vertices, at least two, in driving direction.
    pub centerline: Vec<Vec2>,
    /// Local lane width (m), constant along the lanelet.
    pub width: f64,
}

/// Full projection of a position onto a lanelet centerline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterlineProjection {
    /// Distance along the centerline from its first vertex (m).
    pub arc_length: f64,
    /// Signed perpendicular offset; positive to the left of driving direction.
    pub lateral_offset: f64,
    /// Heading of the centerline at the projected point (radians).
    pub tangent_heading: f64,
}

impl Lanelet {
    pub fn new(id: LaneletId, centerline: Vec<Vec2>, width: f64) -> Self {
        debug_assert!(centerline.len() >= 2, "centerline needs at least 2 vertices");
        Self {
            id,
            centerline,
            width,
        }
    }

    /// Straight lanelet between two points, convenience for tests and demos.
    pub fn straight(id: LaneletId, from: Vec2, to: Vec2, width: f64) -> Self {
        Self::new(id, vec![from, to], width)
    }

    pub fn length(&self) -> f64 {
        self.centerline
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }

    /// Project `position` onto the centerline.
    ///
    /// Returns `None` when the nearest foot point falls beyond the first or
    /// last vertex — the position is outside the longitudinal domain.
    pub fn project(&self, position: Vec2) -> Option<CenterlineProjection> {
        let mut best: Option<(f64, CenterlineProjection)> = None;
        let mut out_of_domain_near = f64::INFINITY;
        let mut arc_start = 0.0;

        let last_segment = self.centerline.len() - 2;
        for (i, pair) in self.centerline.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            let dir = b - a;
            let seg_len = dir.norm();
            if seg_len < f64::EPSILON {
                continue;
            }

            let t_raw = (position - a).dot(dir) / (seg_len * seg_len);

            // Feet beyond the outer ends of the polyline are out of domain.
            let overruns_start = i == 0 && t_raw < 0.0;
            let overruns_end = i == last_segment && t_raw > 1.0;

            let t = t_raw.clamp(0.0, 1.0);
            let foot = a + dir * t;
            let offset_vec = position - foot;
            let dist = offset_vec.norm();

            if overruns_start || overruns_end {
                out_of_domain_near = out_of_domain_near.min(dist);
                arc_start += seg_len;
                continue;
            }

            if best.map_or(true, |(d, _)| dist < d) {
                let heading = dir.angle();
                // Cross product sign gives the side of the centerline.
                let cross = dir.x * offset_vec.y - dir.y * offset_vec.x;
                best = Some((
                    dist,
                    CenterlineProjection {
                        arc_length: arc_start + seg_len * t,
                        lateral_offset: dist.copysign(cross),
                        tangent_heading: heading,
                    },
                ));
            }
            arc_start += seg_len;
        }

        match best {
            // An interior candidate wins only if it is at least as close as
            // any overrunning end; a point past the last vertex also clamps
            // onto the final vertex with a larger distance via t=1, so the
            // comparison keeps genuine overruns out of domain.
            Some((d, proj)) if d <= out_of_domain_near => Some(proj),
            _ => None,
        }
    }

    /// Heading and width at the projected point, or an out-of-domain marker
    /// when the position cannot be projected onto this lanelet.
    pub fn lane_projection(&self, position: Vec2) -> LaneProjection {
        match self.project(position) {
            Some(proj) => LaneProjection {
                lane_id: self.id,
                longitudinal_orientation: Some(proj.tangent_heading),
                lane_width: Some(self.width),
            },
            None => LaneProjection::out_of_domain(self.id),
        }
    }

    /// Whether the position lies within the lanelet surface: inside the
    /// longitudinal domain and within half a width of the centerline.
    pub fn contains(&self, position: Vec2) -> bool {
        self.project(position)
            .map_or(false, |p| p.lateral_offset.abs() <= self.width / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_lane() -> Lanelet {
        // 100 m straight lanelet along +x, 3.5 m wide.
        Lanelet::straight(1, Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 3.5)
    }

    #[test]
    fn test_projection_in_domain() {
        let lane = straight_lane();
        let proj = lane.project(Vec2::new(20.0, 1.0)).unwrap();
        assert!((proj.arc_length - 20.0).abs() < 1e-9);
        assert!((proj.lateral_offset - 1.0).abs() < 1e-9);
        assert!(proj.tangent_heading.abs() < 1e-9);
    }

    #[test]
    fn test_projection_before_start_is_out_of_domain() {
        let lane = straight_lane();
        assert!(lane.project(Vec2::new(-5.0, 0.5)).is_none());
    }

    #[test]
    fn test_projection_past_end_is_out_of_domain() {
        let lane = straight_lane();
        assert!(lane.project(Vec2::new(250.0, 0.0)).is_none());
    }

    #[test]
    fn test_lane_projection_marks_out_of_domain() {
        let lane = straight_lane();
        let lp = lane.lane_projection(Vec2::new(-5.0, 0.0));
        assert!(lp.is_out_of_domain());
        assert_eq!(lp.lane_id, 1);
        assert_eq!(lp.lane_width, None);

        let lp = lane.lane_projection(Vec2::new(50.0, 0.0));
        assert_eq!(lp.longitudinal_orientation, Some(0.0));
        assert_eq!(lp.lane_width, Some(3.5));
    }

    #[test]
    fn test_tangent_heading_on_bent_polyline() {
        // L-shaped centerline: 50 m along +x, then 50 m along +y.
        let lane = Lanelet::new(
            2,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(50.0, 0.0),
                Vec2::new(50.0, 50.0),
            ],
            3.5,
        );
        let first = lane.project(Vec2::new(10.0, 0.2)).unwrap();
        assert!(first.tangent_heading.abs() < 1e-9);

        let second = lane.project(Vec2::new(49.8, 30.0)).unwrap();
        assert!((second.tangent_heading - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((second.arc_length - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_lateral_offset_sign() {
        let lane = straight_lane();
        let left = lane.project(Vec2::new(10.0, 1.5)).unwrap();
        let right = lane.project(Vec2::new(10.0, -1.5)).unwrap();
        assert!(left.lateral_offset > 0.0);
        assert!(right.lateral_offset < 0.0);
    }

    #[test]
    fn test_contains_respects_width() {
        let lane = straight_lane();
        assert!(lane.contains(Vec2::new(30.0, 1.7)));
        assert!(!lane.contains(Vec2::new(30.0, 2.0)));
        assert!(!lane.contains(Vec2::new(-10.0, 0.0)));
    }

    #[test]
    fn test_length() {
        let lane = Lanelet::new(
            3,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(30.0, 0.0),
                Vec2::new(30.0, 40.0),
            ],
            3.0,
        );
        assert!((lane.length() - 70.0).abs() < 1e-9);
    }
}
