//! Camera-related types and components
//!
//! This module contains the main camera marker component and its framing.

use bevy::prelude::*;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Where the camera sits, looking at the arena center.
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 10.0, 12.0);
