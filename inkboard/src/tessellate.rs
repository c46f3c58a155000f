//! Tessellating canvas, turning paths into indexed triangle meshes for GPU hosts.

use crate::overlay::{LogicalSize, Surface};
use inkboard_core::canvas::{Canvas, Path, PathEl};
use inkboard_core::Rgb;

/// Lyon's default. Coarser than a pixel would show at typical pixel ratios.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Vertex {
    /// Logical pixels.
    pub position: [f32; 2],
    /// Straight (not premultiplied) RGBA.
    pub color: [f32; 4],
}

/// Consumes Lyon tessellator events into a colored vertex + 32bit index buffer.
struct LyonVertexBuilder<'data> {
    vertices: &'data mut Vec<Vertex>,
    indices: &'data mut Vec<u32>,
    color: [f32; 4],
    // Past-the-end indices for when the last begin_geometry was called.
    begin_index_pos: usize,
    begin_vertex_pos: usize,
}
impl<'data> LyonVertexBuilder<'data> {
    fn new(vertices: &'data mut Vec<Vertex>, indices: &'data mut Vec<u32>, color: Rgb) -> Self {
        let begin_index_pos = indices.len();
        let begin_vertex_pos = vertices.len();
        Self {
            vertices,
            indices,
            color: color.to_f32_array(1.0),
            begin_index_pos,
            begin_vertex_pos,
        }
    }
    fn push(
        &mut self,
        position: lyon_tessellation::math::Point,
    ) -> Result<lyon_tessellation::VertexId, lyon_tessellation::GeometryBuilderError> {
        use az::CheckedAs;
        let index: u32 = self
            .vertices
            .len()
            .checked_as()
            .ok_or(lyon_tessellation::GeometryBuilderError::TooManyVertices)?;
        self.vertices.push(Vertex {
            position: [position.x, position.y],
            color: self.color,
        });
        Ok(index.into())
    }
}
impl lyon_tessellation::GeometryBuilder for LyonVertexBuilder<'_> {
    fn begin_geometry(&mut self) {
        self.begin_index_pos = self.indices.len();
        self.begin_vertex_pos = self.vertices.len();
    }
    fn add_triangle(
        &mut self,
        a: lyon_tessellation::VertexId,
        b: lyon_tessellation::VertexId,
        c: lyon_tessellation::VertexId,
    ) {
        use az::CheckedAs;
        let Some(min): Option<u32> = self.begin_vertex_pos.checked_as() else {
            return;
        };
        let Some(max): Option<u32> = self
            .vertices
            .len()
            .checked_sub(1)
            .and_then(CheckedAs::checked_as)
        else {
            return;
        };
        let [a, b, c] = [a.0, b.0, c.0];
        // No way to report errors, but if any vertex is out-of-range ignore the whole tri.
        if [a, b, c].iter().all(|i| (min..=max).contains(i)) {
            self.indices.extend_from_slice(&[a, b, c]);
        } else {
            debug_assert!(false, "bad index requested");
        }
    }
    fn abort_geometry(&mut self) {
        // Clear everything written since the start of this geometry.
        self.vertices.truncate(self.begin_vertex_pos);
        self.indices.truncate(self.begin_index_pos);
    }
}
impl lyon_tessellation::FillGeometryBuilder for LyonVertexBuilder<'_> {
    fn add_fill_vertex(
        &mut self,
        vertex: lyon_tessellation::FillVertex,
    ) -> Result<lyon_tessellation::VertexId, lyon_tessellation::GeometryBuilderError> {
        self.push(vertex.position())
    }
}
impl lyon_tessellation::StrokeGeometryBuilder for LyonVertexBuilder<'_> {
    fn add_stroke_vertex(
        &mut self,
        vertex: lyon_tessellation::StrokeVertex,
    ) -> Result<lyon_tessellation::VertexId, lyon_tessellation::GeometryBuilderError> {
        self.push(vertex.position())
    }
}

/// Walk `path` into a lyon builder, keeping its begin/end pairing valid.
fn feed<B>(path: &Path, builder: &mut lyon_tessellation::path::builder::NoAttributes<B>)
where
    B: lyon_tessellation::path::builder::PathBuilder,
{
    use lyon_tessellation::math::point;
    let mut open = false;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                if open {
                    builder.end(false);
                }
                builder.begin(point(p.x, p.y));
                open = true;
            }
            PathEl::Close => {
                if open {
                    builder.close();
                    open = false;
                }
            }
            // Drawing without a current point starts a sub-path there.
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CubicTo(_, _, p) if !open => {
                builder.begin(point(p.x, p.y));
                open = true;
            }
            PathEl::LineTo(p) => {
                builder.line_to(point(p.x, p.y));
            }
            PathEl::QuadTo(c, p) => {
                builder.quadratic_bezier_to(point(c.x, c.y), point(p.x, p.y));
            }
            PathEl::CubicTo(c0, c1, p) => {
                builder.cubic_bezier_to(point(c0.x, c0.y), point(c1.x, c1.y), point(p.x, p.y));
            }
        }
    }
    if open {
        builder.end(false);
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TessellateError {
    #[error(transparent)]
    Lyon(#[from] lyon_tessellation::TessellationError),
}

/// A [`Canvas`] accumulating everything drawn into one mesh, in draw order.
pub struct MeshCanvas {
    fill_tessellator: lyon_tessellation::FillTessellator,
    stroke_tessellator: lyon_tessellation::StrokeTessellator,
    tolerance: f32,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}
impl Default for MeshCanvas {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}
impl MeshCanvas {
    #[must_use]
    pub fn new(tolerance: f32) -> Self {
        Self {
            fill_tessellator: lyon_tessellation::FillTessellator::new(),
            stroke_tessellator: lyon_tessellation::StrokeTessellator::new(),
            tolerance,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
    /// Every index is `< vertices().len()`.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
    /// Append a filled, non-zero winding `path`.
    /// # Errors
    /// Tessellation failed. Nothing of this path was kept, earlier geometry is unaffected.
    pub fn try_fill(&mut self, path: &Path, color: Rgb) -> Result<(), TessellateError> {
        let options = lyon_tessellation::FillOptions::non_zero().with_tolerance(self.tolerance);
        let mut output = LyonVertexBuilder::new(&mut self.vertices, &mut self.indices, color);
        let mut builder = self.fill_tessellator.builder(&options, &mut output);
        feed(path, &mut builder);
        builder.build()?;
        Ok(())
    }
    /// Append a round-capped, round-joined stroke along `path`.
    /// # Errors
    /// See [`Self::try_fill`].
    pub fn try_stroke(&mut self, path: &Path, color: Rgb, width: f32) -> Result<(), TessellateError> {
        let options = lyon_tessellation::StrokeOptions::default()
            .with_tolerance(self.tolerance)
            .with_line_width(width)
            .with_line_cap(lyon_tessellation::LineCap::Round)
            .with_line_join(lyon_tessellation::LineJoin::Round);
        let mut output = LyonVertexBuilder::new(&mut self.vertices, &mut self.indices, color);
        let mut builder = self.stroke_tessellator.builder(&options, &mut output);
        feed(path, &mut builder);
        builder.build()?;
        Ok(())
    }
}
impl Canvas for MeshCanvas {
    fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
    fn fill(&mut self, path: &Path, color: Rgb) {
        if let Err(e) = self.try_fill(path, color) {
            log::warn!("dropped fill: {e}");
        }
    }
    fn stroke(&mut self, path: &Path, color: Rgb, width: f32) {
        if let Err(e) = self.try_stroke(path, color, width) {
            log::warn!("dropped stroke: {e}");
        }
    }
}

/// Two meshes standing in for the overlay's layers. The host uploads and scales them.
#[derive(Default)]
pub struct MeshSurface {
    pub main: MeshCanvas,
    pub guide: MeshCanvas,
    size: Option<(LogicalSize, f32)>,
}
impl MeshSurface {
    /// Last size and pixel ratio given by [`Surface::resize`].
    #[must_use]
    pub fn size(&self) -> Option<(LogicalSize, f32)> {
        self.size
    }
}
impl Surface for MeshSurface {
    type Layer = MeshCanvas;
    fn resize(&mut self, size: LogicalSize, device_pixel_ratio: f32) {
        self.main.clear();
        self.guide.clear();
        self.size = Some((size, device_pixel_ratio));
    }
    fn layers(&mut self) -> (&mut MeshCanvas, &mut MeshCanvas) {
        (&mut self.main, &mut self.guide)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use inkboard_core::math::Vec2;

    fn square() -> Path {
        Path::polygon(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ])
    }
    fn assert_valid(mesh: &MeshCanvas) {
        assert_eq!(mesh.indices().len() % 3, 0);
        let len = u32::try_from(mesh.vertices().len()).unwrap();
        assert!(mesh.indices().iter().all(|&i| i < len));
    }

    #[test]
    fn fill_square() {
        let mut mesh = MeshCanvas::default();
        mesh.fill(&square(), Rgb::WHITE);
        assert_valid(&mesh);
        assert!(mesh.indices().len() >= 6);
        for v in mesh.vertices() {
            assert_eq!(v.color, [1.0; 4]);
            assert!((0.0..=10.0).contains(&v.position[0]));
        }
    }
    #[test]
    fn stroke_is_widened() {
        let mut mesh = MeshCanvas::default();
        let mut path = Path::new();
        path.move_to(Vec2::new(0.0, 0.0))
            .quad_to(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        mesh.stroke(&path, Rgb::BLACK, 4.0);
        assert_valid(&mesh);
        assert!(!mesh.indices().is_empty());
        // Round caps reach past the ends.
        let min_y = mesh
            .vertices()
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        assert!(min_y < -1.0);
    }
    #[test]
    fn appends_in_order_and_clears() {
        let mut mesh = MeshCanvas::default();
        mesh.fill(&square(), Rgb::WHITE);
        let first = mesh.vertices().len();
        mesh.fill(&square(), Rgb::BLACK);
        assert_valid(&mesh);
        assert_eq!(mesh.vertices()[first].color, [0.0, 0.0, 0.0, 1.0]);
        mesh.clear();
        assert!(mesh.vertices().is_empty() && mesh.indices().is_empty());
    }
    #[test]
    fn empty_and_open_paths() {
        let mut mesh = MeshCanvas::default();
        mesh.fill(&Path::new(), Rgb::WHITE);
        assert!(mesh.indices().is_empty());
        // No explicit move.
        let mut path = Path::new();
        path.line_to(Vec2::new(0.0, 0.0)).line_to(Vec2::new(5.0, 0.0));
        mesh.stroke(&path, Rgb::WHITE, 1.0);
        assert_valid(&mesh);
        assert!(!mesh.indices().is_empty());
    }
    #[test]
    fn vertices_are_plain_data() {
        let mut mesh = MeshCanvas::default();
        mesh.fill(&square(), Rgb::WHITE);
        let bytes: &[u8] = bytemuck::cast_slice(mesh.vertices());
        assert_eq!(bytes.len(), mesh.vertices().len() * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
    #[test]
    fn surface_resize_drops_geometry() {
        let mut surface = MeshSurface::default();
        surface.main.fill(&square(), Rgb::WHITE);
        surface.resize(LogicalSize::new(5.0, 5.0), 2.0);
        assert!(surface.main.vertices().is_empty());
        assert_eq!(surface.size(), Some((LogicalSize::new(5.0, 5.0), 2.0)));
    }
}
