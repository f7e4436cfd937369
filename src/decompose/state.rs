use crate::{Nearest, Settings, errors::DecompositionError};

use super::{crossing::{SplitEdges, is_valid_bridge}, topology::{SplitEdge, Topology}};

#[cfg(feature = "debugging")]
use std::fmt;
#[cfg(feature = "debugging")]
use crate::debug;

/// Working state of one decomposition request
pub(crate) struct DecompositionState<'a> {
    pub topo: Topology<'a>,
    pub splits: SplitEdges,
    pub settings: &'a Settings,
    #[cfg(feature = "debugging")]
    svg_context: Option<debug::svg::SvgContext>,
    #[cfg(feature = "debugging")]
    current_step: u32,
    #[cfg(feature = "debugging")]
    current_substep: u32,
}

impl<'a> DecompositionState<'a> {
    pub fn new(topo: Topology<'a>, settings: &'a Settings) -> Self {
        #[cfg(feature = "debugging")]
        let svg_context = debug::svg::SvgContext::from_env(topo.all_points.bbox());

        Self {
            topo,
            splits: SplitEdges::new(settings.leaf_size, settings.split_rebuild_threshold),
            settings,
            #[cfg(feature = "debugging")]
            svg_context,
            #[cfg(feature = "debugging")]
            current_step: 0,
            #[cfg(feature = "debugging")]
            current_substep: 0,
        }
    }

    #[inline]
    pub fn check_cancel(&self) -> Result<(), DecompositionError> {
        if self.settings.is_cancelled() {
            Err(DecompositionError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Can points `p` and `q` be joined by a new bridge?
    pub fn can_bridge(&self, p: usize, q: usize) -> bool {
        let (rp, rq) = (self.topo.ring_of[p], self.topo.ring_of[q]);
        rp != rq
            && !self.topo.is_used(p, rq)
            && !self.topo.is_used(q, rp)
            && is_valid_bridge(&self.topo, &self.splits, p, q)
    }

    /// Record the bridge `pq` and merge the components of its rings
    pub fn add_bridge(&mut self, p: usize, q: usize, pinned: bool) -> Result<usize, DecompositionError> {
        let edge = SplitEdge {
            from: self.topo.ref_point(p),
            to: self.topo.ref_point(q),
            length: self.topo.points[p].distance(self.topo.points[q]),
            excluded: false,
            pinned,
        };
        let id = self.splits.push(self.topo.points, edge)?;
        self.topo.mark_used(p, q);
        self.topo.union(edge.from.polygon_id, edge.to.polygon_id);

        #[cfg(feature = "debugging")]
        self.output_svg(debug::svg::SvgDecompositionStyle::highlight_split(id), debug::svg::SvgOutputLevel::AllSteps);

        Ok(id)
    }

    pub fn exclude_bridge(&mut self, id: usize) -> Result<(), DecompositionError> {
        self.splits.exclude(self.topo.points, id)?;
        Ok(())
    }

    pub fn include_bridge(&mut self, id: usize) -> Result<(), DecompositionError> {
        self.splits.include(self.topo.points, id)?;
        Ok(())
    }

    /// The nearest point of another component that `p` can be bridged to
    pub fn nearest_target(&self, p: usize) -> Option<Nearest> {
        let group = self.topo.group_of(self.topo.ring_of[p]);
        let query = self.topo.points[p];
        self.topo.all_points.nearest(query, f64::INFINITY, |q, _| {
            self.topo.group_of(self.topo.ring_of[q]) != group && self.can_bridge(p, q)
        })
    }

    /// Scan outward from `ring`: its leftmost point, then its rightmost point,
    /// then the remaining points by increasing x. Returns the first bridge found.
    pub fn scan_ring(&self, ring: usize) -> Result<Option<(usize, usize)>, DecompositionError> {
        let polygon = &self.topo.polygons[ring];
        let points = self.topo.points;

        let mut rest: Vec<usize> = polygon.range.clone()
            .filter(|&p| p != polygon.leftmost && p != polygon.rightmost)
            .collect();
        rest.sort_by(|&a, &b| points[a].x.total_cmp(&points[b].x).then(a.cmp(&b)));

        let mut order = vec![polygon.leftmost];
        if polygon.rightmost != polygon.leftmost {
            order.push(polygon.rightmost);
        }
        order.extend(rest);

        for p in order {
            self.check_cancel()?;
            if let Some(target) = self.nearest_target(p) {
                return Ok(Some((p, target.id)));
            }
        }
        Ok(None)
    }

    /// Bridge `ring` (and whatever it reaches) until its component contains the outer ring
    pub fn connect_ring(&mut self, ring: usize, pinned: bool) -> Result<(), DecompositionError> {
        let mut current = ring;
        while !self.topo.is_connected(current) {
            let mut found = self.scan_ring(current)?;
            if found.is_none() {
                let members: Vec<usize> = self.topo.group_members(current).filter(|&r| r != current).collect();
                for member in members {
                    found = self.scan_ring(member)?;
                    if found.is_some() {
                        break;
                    }
                }
            }

            let (p, q) = found.ok_or(DecompositionError::NoBridge { ring: current })?;
            self.add_bridge(p, q, pinned)?;
            current = self.topo.ring_of[q];
        }
        Ok(())
    }

    /// The closest pair of points `(p, q, distance)` with `p` on ring `a` and `q` on ring `b` that can be bridged
    pub fn nearest_pair(&self, a: usize, b: usize) -> Option<(usize, usize, f64)> {
        let swap = self.topo.polygons[a].len() > self.topo.polygons[b].len();
        let (from, to) = if swap { (b, a) } else { (a, b) };
        let target = &self.topo.polygons[to];
        let points = self.topo.points;

        let mut best: Option<(usize, usize, f64)> = None;
        let mut bound = f64::INFINITY;
        for p in self.topo.polygons[from].range.clone() {
            if target.bbox.distance(points[p]) > bound {
                continue;
            }
            if let Some(n) = target.points_tree.nearest(points[p], bound, |q, _| self.can_bridge(p, q)) {
                if best.map_or(true, |(_, _, d)| n.distance < d) {
                    best = Some((p, n.id, n.distance));
                    bound = n.distance;
                }
            }
        }

        best.map(|(p, q, d)| if swap { (q, p, d) } else { (p, q, d) })
    }

    #[cfg(feature = "debugging")]
    pub fn output_svg(&mut self, style: debug::svg::SvgDecompositionStyle, level: debug::svg::SvgOutputLevel) {
        if let Some(svg_context) = &self.svg_context {
            if svg_context.output_level >= level {
                // Make the directory for this step if this is the first svg
                if self.current_substep == 0 {
                    let path = svg_context.output_path.join(format!("{:03}", self.current_step));
                    if std::fs::create_dir_all(path).is_err() {
                        return;
                    }
                }

                let mut svg = debug::svg::SvgOutput::new(svg_context, style);
                let _ = svg.append_element(self, &());

                let path: std::path::PathBuf = format!("{:03}", self.current_step).into();
                let path = path.join(format!("{:03}.svg", self.current_substep));
                let _ = svg.save(path);

                self.current_substep += 1;
            }
        }
    }

    #[cfg(feature = "debugging")]
    pub fn advance_step(&mut self) {
        if let Some(svg_context) = &self.svg_context {
            if svg_context.output_level >= debug::svg::SvgOutputLevel::MajorSteps {
                let dir = svg_context.output_path.join(format!("{:03}", self.current_step));
                if std::fs::create_dir_all(&dir).is_ok() {
                    if let Ok(f) = std::fs::File::create(dir.join("state.txt")) {
                        let mut w = std::io::BufWriter::new(&f);
                        let _ = state_fmt(&mut w, self);
                    }
                }

                self.current_step += 1;
                self.current_substep = 0;
            }
        }
    }

    #[cfg(feature = "debugging")]
    pub fn output_faces(&self, faces: &[Vec<usize>]) {
        if let Some(svg_context) = &self.svg_context {
            if svg_context.output_level >= debug::svg::SvgOutputLevel::ResultOnly {
                if std::fs::create_dir_all(&svg_context.output_path).is_err() {
                    return;
                }
                let mut svg = debug::svg::SvgOutput::new(svg_context, debug::svg::SvgDecompositionStyle::default());
                let _ = svg.append_element(&Faces(faces), self);
                let _ = svg.save("result.svg");
            }
        }
    }
}

#[cfg(feature = "debugging")]
fn state_fmt(w: &mut impl std::io::Write, state: &DecompositionState<'_>) -> std::io::Result<()> {
    writeln!(w, "points:")?;
    if let Some(tree) = state.topo.all_points.as_text_tree() {
        writeln!(w, "{}", tree)?;
    }

    for (ring, polygon) in state.topo.polygons.iter().enumerate() {
        writeln!(w, "ring {}: points {}..{} group {} centroid {}", ring, polygon.range.start, polygon.range.end, polygon.group, polygon.centroid)?;
        if let Some(tree) = polygon.edges_tree.as_text_tree() {
            writeln!(w, "{}", tree)?;
        }
    }

    writeln!(w, "split edges ({} index rebuilds):", state.splits.rebuilds())?;
    for (id, e) in state.splits.edges().iter().enumerate() {
        writeln!(w, "{}: {}", id, e)?;
    }
    if let Some(tree) = state.splits.index().as_text_tree() {
        writeln!(w, "{}", tree)?;
    }
    Ok(())
}

#[cfg(feature = "debugging")]
impl<'a> debug::svg::SvgElement<debug::svg::SvgDecompositionStyle, ()> for DecompositionState<'a> {
    fn write_svg<'b>(&self, svg_output: &mut debug::svg::SvgOutput<'b, debug::svg::SvgDecompositionStyle>, _state: &()) -> fmt::Result {
        use svg_fmt::*;
        use fmt::Write;

        let points = self.topo.points;
        for ring in &self.topo.polygons {
            let vs: Vec<[f32; 2]> = points[ring.range.clone()].iter().map(|p| [p.x as f32, p.y as f32]).collect();
            writeln!(svg_output, "{}",
                polygon(&vs)
                    .stroke(Stroke::Color(black(), svg_output.context.percent(0.3)))
            )?;
        }

        for (id, e) in self.splits.edges().iter().enumerate() {
            let (a, b) = (points[e.from.point_id], points[e.to.point_id]);
            let color = match svg_output.style.split_style(id, e.excluded) {
                debug::svg::SvgElementStyle::Hide => continue,
                debug::svg::SvgElementStyle::Standard if e.excluded => rgb(180, 180, 180),
                debug::svg::SvgElementStyle::Standard if e.pinned => rgb(255, 0, 255),
                debug::svg::SvgElementStyle::Standard => blue(),
                debug::svg::SvgElementStyle::Highlight => rgb(255, 126, 0),
            };
            writeln!(svg_output, "{}",
                line_segment(a.x as f32, a.y as f32, b.x as f32, b.y as f32)
                    .color(color)
                    .width(svg_output.context.percent(0.25))
            )?;
        }

        let r = svg_output.context.percent(0.3);
        let show_labels = svg_output.context.show_labels && svg_output.style.add_labels;
        for (id, p) in points.iter().enumerate() {
            writeln!(svg_output, "{}",
                debug::svg::circle(p.x as f32, p.y as f32, r)
                    .fill(Fill::Color(green()))
            )?;
            if show_labels {
                writeln!(svg_output, "{}",
                    text(p.x as f32 + r, p.y as f32 - r, format!("{}", id))
                        .size(svg_output.context.percent(1.5))
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "debugging")]
struct Faces<'f>(&'f [Vec<usize>]);

#[cfg(feature = "debugging")]
impl<'a, 'f> debug::svg::SvgElement<debug::svg::SvgDecompositionStyle, DecompositionState<'a>> for Faces<'f> {
    fn write_svg<'b>(&self, svg_output: &mut debug::svg::SvgOutput<'b, debug::svg::SvgDecompositionStyle>, state: &DecompositionState<'a>) -> fmt::Result {
        use svg_fmt::*;
        use fmt::Write;

        let points = state.topo.points;
        for (i, face) in self.0.iter().enumerate() {
            let vs: Vec<[f32; 2]> = face.iter().map(|&p| [points[p].x as f32, points[p].y as f32]).collect();
            let shade = (40 + (i * 67) % 180) as u8;
            writeln!(svg_output, "{}",
                polygon(&vs)
                    .fill(Fill::Color(rgb(shade, 200, 255 - shade)))
                    .stroke(Stroke::Color(black(), svg_output.context.percent(0.2)))
            )?;
        }
        Ok(())
    }
}
