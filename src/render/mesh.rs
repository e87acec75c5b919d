use crate::config::Shape;
use gl::types::*;
use std::mem;
use std::ptr;

/// Floats per vertex: position (3) + texture coordinate (2).
pub const VERTEX_STRIDE: usize = 5;

const TRIANGLE_VERTICES: [f32; 15] = [
    // positions      // texture coords
    -0.5, -0.5, 0.0, 0.0, 0.0, //
    0.5, -0.5, 0.0, 1.0, 0.0, //
    0.0, 0.5, 0.0, 0.5, 1.0, //
];

const QUAD_VERTICES: [f32; 20] = [
    -0.5, -0.5, 0.0, 0.0, 0.0, //
    0.5, -0.5, 0.0, 1.0, 0.0, //
    0.5, 0.5, 0.0, 1.0, 1.0, //
    -0.5, 0.5, 0.0, 0.0, 1.0, //
];

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

const CUBE_VERTICES: [f32; 180] = [
    // back face
    -0.5, -0.5, -0.5, 0.0, 0.0, //
    0.5, -0.5, -0.5, 1.0, 0.0, //
    0.5, 0.5, -0.5, 1.0, 1.0, //
    0.5, 0.5, -0.5, 1.0, 1.0, //
    -0.5, 0.5, -0.5, 0.0, 1.0, //
    -0.5, -0.5, -0.5, 0.0, 0.0, //
    // front face
    -0.5, -0.5, 0.5, 0.0, 0.0, //
    0.5, -0.5, 0.5, 1.0, 0.0, //
    0.5, 0.5, 0.5, 1.0, 1.0, //
    0.5, 0.5, 0.5, 1.0, 1.0, //
    -0.5, 0.5, 0.5, 0.0, 1.0, //
    -0.5, -0.5, 0.5, 0.0, 0.0, //
    // left face
    -0.5, 0.5, 0.5, 1.0, 0.0, //
    -0.5, 0.5, -0.5, 1.0, 1.0, //
    -0.5, -0.5, -0.5, 0.0, 1.0, //
    -0.5, -0.5, -0.5, 0.0, 1.0, //
    -0.5, -0.5, 0.5, 0.0, 0.0, //
    -0.5, 0.5, 0.5, 1.0, 0.0, //
    // right face
    0.5, 0.5, 0.5, 1.0, 0.0, //
    0.5, 0.5, -0.5, 1.0, 1.0, //
    0.5, -0.5, -0.5, 0.0, 1.0, //
    0.5, -0.5, -0.5, 0.0, 1.0, //
    0.5, -0.5, 0.5, 0.0, 0.0, //
    0.5, 0.5, 0.5, 1.0, 0.0, //
    // bottom face
    -0.5, -0.5, -0.5, 0.0, 1.0, //
    0.5, -0.5, -0.5, 1.0, 1.0, //
    0.5, -0.5, 0.5, 1.0, 0.0, //
    0.5, -0.5, 0.5, 1.0, 0.0, //
    -0.5, -0.5, 0.5, 0.0, 0.0, //
    -0.5, -0.5, -0.5, 0.0, 1.0, //
    // top face
    -0.5, 0.5, -0.5, 0.0, 1.0, //
    0.5, 0.5, -0.5, 1.0, 1.0, //
    0.5, 0.5, 0.5, 1.0, 0.0, //
    0.5, 0.5, 0.5, 1.0, 0.0, //
    -0.5, 0.5, 0.5, 0.0, 0.0, //
    -0.5, 0.5, -0.5, 0.0, 1.0, //
];

impl Shape {
    /// Interleaved vertex data for this primitive.
    pub fn vertices(self) -> &'static [f32] {
        match self {
            Shape::Triangle => &TRIANGLE_VERTICES,
            Shape::Quad => &QUAD_VERTICES,
            Shape::Cube => &CUBE_VERTICES,
        }
    }

    /// Index data, for the primitives that draw indexed.
    pub fn indices(self) -> Option<&'static [u32]> {
        match self {
            Shape::Quad => Some(&QUAD_INDICES),
            _ => None,
        }
    }
}

/// Vertex array plus its buffers for one primitive. GL objects are released
/// exactly once, on drop.
pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    vertex_count: GLsizei,
    index_count: GLsizei,
}

impl Mesh {
    pub fn build(shape: Shape) -> Self {
        let vertices = shape.vertices();
        let indices = shape.indices();

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (vertices.len() * mem::size_of::<f32>()) as isize,
                vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            if let Some(indices) = indices {
                gl::GenBuffers(1, &mut ebo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    (indices.len() * mem::size_of::<u32>()) as isize,
                    indices.as_ptr() as *const _,
                    gl::STATIC_DRAW,
                );
            }

            let stride = (VERTEX_STRIDE * mem::size_of::<f32>()) as i32;

            // Position attribute
            gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, stride, ptr::null());
            gl::EnableVertexAttribArray(0);

            // Texture coordinate attribute
            gl::VertexAttribPointer(
                1,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (3 * mem::size_of::<f32>()) as *const _,
            );
            gl::EnableVertexAttribArray(1);

            gl::BindVertexArray(0);
        }

        Self {
            vao,
            vbo,
            ebo,
            vertex_count: (vertices.len() / VERTEX_STRIDE) as GLsizei,
            index_count: indices.map_or(0, |i| i.len()) as GLsizei,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            if self.ebo != 0 {
                gl::DrawElements(
                    gl::TRIANGLES,
                    self.index_count,
                    gl::UNSIGNED_INT,
                    ptr::null(),
                );
            } else {
                gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count);
            }
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            if self.ebo != 0 {
                gl::DeleteBuffers(1, &self.ebo);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_data_matches_stride() {
        for shape in [Shape::Triangle, Shape::Quad, Shape::Cube] {
            assert_eq!(
                shape.vertices().len() % VERTEX_STRIDE,
                0,
                "{} vertex data not a whole number of vertices",
                shape.name()
            );
        }
    }

    #[test]
    fn test_triangle_and_cube_draw_unindexed() {
        assert!(Shape::Triangle.indices().is_none());
        assert!(Shape::Cube.indices().is_none());
        assert_eq!(Shape::Triangle.vertices().len() / VERTEX_STRIDE, 3);
        assert_eq!(Shape::Cube.vertices().len() / VERTEX_STRIDE, 36);
    }

    #[test]
    fn test_quad_indices_stay_in_range() {
        let vertex_count = (Shape::Quad.vertices().len() / VERTEX_STRIDE) as u32;
        let indices = Shape::Quad.indices().unwrap();
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn test_texture_coords_normalized() {
        for shape in [Shape::Triangle, Shape::Quad, Shape::Cube] {
            for vertex in shape.vertices().chunks(VERTEX_STRIDE) {
                let (u, v) = (vertex[3], vertex[4]);
                assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v));
            }
        }
    }
}
