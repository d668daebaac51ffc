//! Ring-Layout der sichtbaren Bubbles um den Hub.

use super::{BubbleId, BubbleItem};
use glam::DVec2;
use std::f64::consts::TAU;

/// Position einer Bubble auf dem Ring
#[derive(Debug, Clone, PartialEq)]
pub struct RingSlot {
    /// ID der platzierten Bubble
    pub id: BubbleId,
    /// Mittelpunkt der Bubble (DIP)
    pub center: DVec2,
    /// Winkel auf dem Ring in Radiant
    pub angle: f64,
}

/// Verteilt `count` Punkte gleichmäßig auf einem Kreis.
///
/// Der erste Punkt liegt bei `angle_offset` (0 = rechts vom Hub), die weiteren
/// folgen im mathematisch positiven Drehsinn.
pub fn ring_positions(count: usize, hub: DVec2, radius: f64, angle_offset: f64) -> Vec<DVec2> {
    (0..count)
        .map(|i| hub + DVec2::from_angle(slot_angle(i, count, angle_offset)) * radius)
        .collect()
}

/// Platziert die übergebenen Bubbles in Anzeige-Reihenfolge auf dem Ring.
pub fn layout_ring(
    items: &[BubbleItem],
    hub: DVec2,
    radius: f64,
    angle_offset: f64,
) -> Vec<RingSlot> {
    ring_positions(items.len(), hub, radius, angle_offset)
        .into_iter()
        .zip(items)
        .enumerate()
        .map(|(i, (center, item))| RingSlot {
            id: item.id.clone(),
            center,
            angle: slot_angle(i, items.len(), angle_offset),
        })
        .collect()
}

fn slot_angle(index: usize, count: usize, angle_offset: f64) -> f64 {
    TAU * index as f64 / count as f64 + angle_offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BubbleItemType;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_leerer_ring_hat_keine_positionen() {
        assert!(ring_positions(0, DVec2::ZERO, 180.0, 0.0).is_empty());
        assert!(layout_ring(&[], DVec2::ZERO, 180.0, 0.0).is_empty());
    }

    #[test]
    fn test_vier_bubbles_liegen_auf_den_achsen() {
        let hub = DVec2::new(500.0, 400.0);
        let positions = ring_positions(4, hub, 180.0, 0.0);

        let expected = [
            DVec2::new(680.0, 400.0),
            DVec2::new(500.0, 580.0),
            DVec2::new(320.0, 400.0),
            DVec2::new(500.0, 220.0),
        ];
        for (actual, expected) in positions.iter().zip(expected) {
            assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-9);
            assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_layout_behaelt_reihenfolge_und_abstand() {
        let items: Vec<BubbleItem> = (0..5)
            .map(|i| BubbleItem::with_path(BubbleItemType::File, &format!("/f{i}"), format!("f{i}")))
            .collect();
        let hub = DVec2::new(10.0, 20.0);

        let slots = layout_ring(&items, hub, 180.0, 0.25);

        assert_eq!(slots.len(), 5);
        for (slot, item) in slots.iter().zip(&items) {
            assert_eq!(slot.id, item.id);
            assert_abs_diff_eq!(slot.center.distance(hub), 180.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(slots[0].angle, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(slots[1].angle - slots[0].angle, TAU / 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_layout_nutzt_dieselben_positionen_wie_ring_positions() {
        let items: Vec<BubbleItem> = (0..7)
            .map(|i| BubbleItem::command(format!("c{i}"), "true", None))
            .collect();
        let hub = DVec2::new(-40.0, 75.0);

        let slots = layout_ring(&items, hub, 120.0, 1.1);
        let positions = ring_positions(items.len(), hub, 120.0, 1.1);

        let centers: Vec<DVec2> = slots.iter().map(|slot| slot.center).collect();
        assert_eq!(centers, positions);
    }
}
