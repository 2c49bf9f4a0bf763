use bytemuck::{Pod, Zeroable};
use gl::types::{GLsizei, GLuint};
use std::ffi::c_void;
use std::mem::size_of;
use std::ptr;

use super::check::GlCallError;
use crate::gl_call;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex {
        position: [-0.5, -0.5],
    },
    Vertex {
        position: [0.5, -0.5],
    },
    Vertex {
        position: [0.5, 0.5],
    },
    Vertex {
        position: [-0.5, 0.5],
    },
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Static geometry uploaded once; the vertex array, vertex buffer and index
/// buffer live as long as the mesh.
pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    ibo: GLuint,
    index_count: GLsizei,
}

impl Mesh {
    /// A unit quad centered on the origin, two triangles.
    pub fn quad() -> Result<Self, GlCallError> {
        Self::new(&QUAD_VERTICES, &QUAD_INDICES)
    }

    pub fn new(vertices: &[Vertex], indices: &[u32]) -> Result<Self, GlCallError> {
        let mut vao = 0;
        gl_call!(gl::GenVertexArrays(1, &mut vao))?;
        gl_call!(gl::BindVertexArray(vao))?;

        let mut vbo = 0;
        gl_call!(gl::GenBuffers(1, &mut vbo))?;
        gl_call!(gl::BindBuffer(gl::ARRAY_BUFFER, vbo))?;

        let vertex_bytes: &[u8] = bytemuck::cast_slice(vertices);
        gl_call!(gl::BufferData(
            gl::ARRAY_BUFFER,
            vertex_bytes.len() as isize,
            vertex_bytes.as_ptr() as *const c_void,
            gl::STATIC_DRAW,
        ))?;

        gl_call!(gl::VertexAttribPointer(
            0,
            2,
            gl::FLOAT,
            gl::FALSE,
            size_of::<Vertex>() as GLsizei,
            ptr::null(),
        ))?;
        gl_call!(gl::EnableVertexAttribArray(0))?;

        let mut ibo = 0;
        gl_call!(gl::GenBuffers(1, &mut ibo))?;
        gl_call!(gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo))?;
        gl_call!(gl::BufferData(
            gl::ELEMENT_ARRAY_BUFFER,
            (indices.len() * size_of::<u32>()) as isize,
            indices.as_ptr() as *const c_void,
            gl::STATIC_DRAW,
        ))?;

        Ok(Self {
            vao,
            vbo,
            ibo,
            index_count: indices.len() as GLsizei,
        })
    }

    pub fn draw(&self) -> Result<(), GlCallError> {
        gl_call!(gl::BindVertexArray(self.vao))?;
        gl_call!(gl::DrawElements(
            gl::TRIANGLES,
            self.index_count,
            gl::UNSIGNED_INT,
            ptr::null(),
        ))?;
        Ok(())
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteBuffers(1, &self.ibo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(size_of::<Vertex>(), 2 * size_of::<f32>());
    }

    #[test]
    fn test_quad_indices_reference_real_vertices() {
        for &index in &QUAD_INDICES {
            assert!((index as usize) < QUAD_VERTICES.len());
        }
    }

    #[test]
    fn test_quad_is_two_triangles() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert_eq!(QUAD_VERTICES.len(), 4);
    }
}
