//! Objects attached to scene graph nodes.

use std::fmt;
use std::sync::Arc;

use crate::math::{scalar, Scalar, Vec3};
use crate::mesh::{Mesh, NormalSource};

/// What a scene graph node carries. The renderer matches on the variant.
#[derive(Clone, Debug)]
pub enum GameObject {
    /// Grouping node with no visual.
    Empty { name: String },
    /// The camera's state lives entirely in its node's transform.
    Camera { name: String },
    Model(ModelObject),
    Light(LightObject),
}

impl GameObject {
    pub fn empty(name: impl Into<String>) -> Self {
        Self::Empty { name: name.into() }
    }

    pub fn camera(name: impl Into<String>) -> Self {
        Self::Camera { name: name.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Empty { name } | Self::Camera { name } => name,
            Self::Model(model) => &model.name,
            Self::Light(light) => &light.name,
        }
    }
}

impl From<ModelObject> for GameObject {
    fn from(model: ModelObject) -> Self {
        Self::Model(model)
    }
}

impl From<LightObject> for GameObject {
    fn from(light: LightObject) -> Self {
        Self::Light(light)
    }
}

/// An instance of a mesh with its shading flags.
#[derive(Clone, Debug)]
pub struct ModelObject {
    pub name: String,
    pub mesh: Arc<Mesh>,
    /// Shade with flat face normals instead of the mesh normals.
    pub ignore_mesh_normals: bool,
    pub specular_exponent: Scalar,
    pub ignore_specular: bool,
}

impl ModelObject {
    pub const DEFAULT_SPECULAR_EXPONENT: Scalar = 32.0;

    pub fn new(name: impl Into<String>, mesh: Arc<Mesh>) -> Self {
        Self {
            name: name.into(),
            mesh,
            ignore_mesh_normals: false,
            specular_exponent: Self::DEFAULT_SPECULAR_EXPONENT,
            ignore_specular: false,
        }
    }

    pub fn with_specular_exponent(mut self, exponent: Scalar) -> Self {
        self.specular_exponent = exponent;
        self
    }

    pub fn with_ignore_specular(mut self, ignore: bool) -> Self {
        self.ignore_specular = ignore;
        self
    }

    pub fn with_ignore_mesh_normals(mut self, ignore: bool) -> Self {
        self.ignore_mesh_normals = ignore;
        self
    }

    pub fn normal_source(&self) -> NormalSource {
        if self.ignore_mesh_normals {
            NormalSource::Face
        } else {
            NormalSource::Mesh
        }
    }
}

/// A point light. `color` uses the `0..=65535` channel range.
#[derive(Clone, Debug)]
pub struct LightObject {
    pub name: String,
    pub color: Vec3,
    pub falloff: Falloff,
}

impl LightObject {
    pub fn new(name: impl Into<String>, color: Vec3, falloff: Falloff) -> Self {
        Self {
            name: name.into(),
            color,
            falloff,
        }
    }
}

/// Maps light distance to an intensity multiplier.
#[derive(Clone, Default)]
pub enum Falloff {
    /// Full intensity at any distance.
    #[default]
    Constant,
    /// `1 - distance / range`, reaching zero at `range`.
    Linear { range: Scalar },
    /// `distance^-exponent`, with distances below one treated as one.
    InversePower { exponent: Scalar },
    Custom(Arc<dyn Fn(Scalar) -> Scalar + Send + Sync>),
}

impl Falloff {
    pub fn custom(f: impl Fn(Scalar) -> Scalar + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Intensity multiplier at `distance`, always within `[0, 1]`.
    pub fn evaluate(&self, distance: Scalar) -> Scalar {
        let raw = match self {
            Self::Constant => 1.0,
            Self::Linear { range } => 1.0 - distance / range,
            Self::InversePower { exponent } => distance.max(1.0).powf(-exponent),
            Self::Custom(f) => f(distance),
        };
        if raw.is_nan() {
            return 0.0;
        }
        scalar::clamp(0.0, 1.0, raw)
    }
}

impl fmt::Debug for Falloff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => write!(f, "Constant"),
            Self::Linear { range } => f.debug_struct("Linear").field("range", range).finish(),
            Self::InversePower { exponent } => f
                .debug_struct("InversePower")
                .field("exponent", exponent)
                .finish(),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
