//! Procedural die face textures
//!
//! Faces are drawn with the `image` crate (background in the theme color,
//! darkened border, beveled pips) and uploaded as Bevy images. Materials are
//! cached per theme; changing the theme drops the cache so only dice created
//! afterwards pick up the new look.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use image::{Rgba, RgbaImage};

use crate::dice3d::types::ThemeColor;

/// Edge length of a generated face texture in pixels.
pub const FACE_TEXTURE_SIZE: u32 = 256;

const OFF_WHITE: [u8; 4] = [0xfe, 0xfe, 0xfe, 0xff];
const DARK_PIP: [u8; 4] = [0x11, 0x11, 0x11, 0xff];
const LIGHT_PIP: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Pip radius as a fraction of the face size.
const PIP_RADIUS: f32 = 0.08;
/// Bevel highlight radius and offset as fractions of the face size.
const BEVEL_RADIUS: f32 = 0.04;
const BEVEL_OFFSET: f32 = 5.0 / 1024.0;
/// Width of the darkened border as a fraction of the face size.
const BORDER_WIDTH: f32 = 0.025;

/// Pip centers for each value, as fractions of the face size.
pub fn pip_layout(value: u32) -> &'static [(f32, f32)] {
    match value {
        1 => &[(0.5, 0.5)],
        2 => &[(0.25, 0.25), (0.75, 0.75)],
        3 => &[(0.25, 0.25), (0.5, 0.5), (0.75, 0.75)],
        4 => &[(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)],
        5 => &[
            (0.25, 0.25),
            (0.75, 0.25),
            (0.5, 0.5),
            (0.25, 0.75),
            (0.75, 0.75),
        ],
        6 => &[
            (0.25, 0.25),
            (0.75, 0.25),
            (0.25, 0.5),
            (0.75, 0.5),
            (0.25, 0.75),
            (0.75, 0.75),
        ],
        _ => &[],
    }
}

pub fn background_color(theme: &ThemeColor) -> [u8; 4] {
    if theme.is_white() {
        OFF_WHITE
    } else {
        theme.rgba8()
    }
}

pub fn pip_color(theme: &ThemeColor) -> [u8; 4] {
    if theme.is_light() {
        DARK_PIP
    } else {
        LIGHT_PIP
    }
}

fn blend(under: Rgba<u8>, over: [u8; 3], alpha: f32) -> Rgba<u8> {
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - alpha) + b as f32 * alpha).round() as u8;
    Rgba([
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
        under[3],
    ])
}

fn fill_circle(
    image: &mut RgbaImage,
    cx: f32,
    cy: f32,
    radius: f32,
    mut paint: impl FnMut(Rgba<u8>) -> Rgba<u8>,
) {
    let (width, height) = image.dimensions();
    let min_x = (cx - radius).floor().max(0.0) as u32;
    let min_y = (cy - radius).floor().max(0.0) as u32;
    let max_x = ((cx + radius).ceil() as u32).min(width.saturating_sub(1));
    let max_y = ((cy + radius).ceil() as u32).min(height.saturating_sub(1));

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                let pixel = image.get_pixel_mut(x, y);
                *pixel = paint(*pixel);
            }
        }
    }
}

/// Draw the face showing `value` for `theme`.
pub fn render_face_image(theme: &ThemeColor, value: u32, size: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(size, size, Rgba(background_color(theme)));
    let extent = size as f32;

    let border = (BORDER_WIDTH * extent).ceil() as u32;
    for y in 0..size {
        for x in 0..size {
            if x < border || y < border || x >= size - border || y >= size - border {
                let pixel = image.get_pixel_mut(x, y);
                *pixel = blend(*pixel, [0, 0, 0], 0.1);
            }
        }
    }

    let pip = pip_color(theme);
    for (fx, fy) in pip_layout(value) {
        let (cx, cy) = (fx * extent, fy * extent);
        fill_circle(&mut image, cx, cy, PIP_RADIUS * extent, |_| Rgba(pip));

        let offset = BEVEL_OFFSET * extent;
        fill_circle(
            &mut image,
            cx + offset,
            cy + offset,
            BEVEL_RADIUS * extent,
            |under| blend(under, [0, 0, 0], 0.2),
        );
    }

    image
}

fn bevy_image_from_rgba(face: RgbaImage) -> Image {
    let (width, height) = face.dimensions();
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        face.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// The six face materials for one theme, indexed by face value.
#[derive(Clone, Debug)]
pub struct FaceMaterialSet {
    theme: ThemeColor,
    by_value: [Handle<StandardMaterial>; 6],
}

impl FaceMaterialSet {
    pub fn theme(&self) -> &ThemeColor {
        &self.theme
    }

    /// Material for the face showing `value` (1..=6).
    pub fn material(&self, value: u32) -> Handle<StandardMaterial> {
        let index = (value.clamp(1, 6) - 1) as usize;
        self.by_value[index].clone()
    }
}

/// Cache of face materials for the most recently used theme.
#[derive(Resource, Default)]
pub struct FaceTextures {
    cached: Option<FaceMaterialSet>,
}

impl FaceTextures {
    /// Forget cached materials; the next die rebuilds them.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_cached_for(&self, theme: &ThemeColor) -> bool {
        self.cached.as_ref().is_some_and(|set| set.theme == *theme)
    }

    /// Face materials for `theme`, rendering them if the cache is empty or
    /// was built for another theme.
    pub fn materials_for(
        &mut self,
        theme: &ThemeColor,
        images: &mut Assets<Image>,
        materials: &mut Assets<StandardMaterial>,
    ) -> FaceMaterialSet {
        if let Some(set) = self.cached.as_ref().filter(|set| set.theme == *theme) {
            return set.clone();
        }

        debug!("Rendering face textures for theme {}", theme);
        let by_value = std::array::from_fn(|index| {
            let face = render_face_image(theme, index as u32 + 1, FACE_TEXTURE_SIZE);
            let texture = images.add(bevy_image_from_rgba(face));
            materials.add(StandardMaterial {
                base_color_texture: Some(texture),
                perceptual_roughness: 0.1,
                metallic: 0.1,
                ..default()
            })
        });

        let set = FaceMaterialSet {
            theme: theme.clone(),
            by_value,
        };
        self.cached = Some(set.clone());
        set
    }
}
