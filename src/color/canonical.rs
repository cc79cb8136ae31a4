use ahash::AHashMap;
use anyhow::{ensure, Result};
use log::info;

use crate::color::ColoringService;
use crate::district::District;

/// Replace opaque color tokens with dense indices in first-seen order:
/// the first distinct token becomes 0, the next new one 1, and so on.
/// Returns the per-item indices and the number of distinct tokens.
pub fn canonicalize_colors<S: AsRef<str>>(tokens: &[S]) -> (Vec<u32>, usize) {
    let mut seen: AHashMap<&str, u32> = AHashMap::new();
    let indices = tokens.iter()
        .map(|token| {
            let next = seen.len() as u32;
            *seen.entry(token.as_ref()).or_insert(next)
        })
        .collect();
    (indices, seen.len())
}

/// Color every district through `service` and attach the dense color index.
/// Returns the number of distinct colors.
pub fn assign_color_indices(districts: &mut [District], service: &dyn ColoringService) -> Result<usize> {
    let shapes: Vec<_> = districts.iter().map(|d| &d.shape).collect();
    let tokens = service.assign(&shapes)?;
    ensure!(
        tokens.len() == districts.len(),
        "coloring service returned {} colors for {} districts", tokens.len(), districts.len()
    );

    let (indices, count) = canonicalize_colors(&tokens);
    for (district, index) in districts.iter_mut().zip(indices) {
        district.props.color_index = Some(index);
    }
    info!("[color] {} distinct colors across {} districts", count, districts.len());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::MultiPolygon;
    use serde_json::Value;

    use crate::district::DistrictProps;

    #[test]
    fn first_seen_order() {
        let (indices, count) = canonicalize_colors(&["#f00", "#0f0", "#f00", "#00f", "#0f0"]);
        assert_eq!(indices, vec![0, 1, 0, 2, 1]);
        assert_eq!(count, 3);
    }

    #[test]
    fn indices_are_contiguous() {
        let tokens: Vec<String> = ["e", "d", "e", "c", "b", "a", "a"].iter().map(|s| s.to_string()).collect();
        let (indices, count) = canonicalize_colors(&tokens);
        let mut distinct = indices.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(distinct, (0..count as u32).collect::<Vec<_>>());
    }

    #[test]
    fn empty_input() {
        let (indices, count) = canonicalize_colors::<&str>(&[]);
        assert!(indices.is_empty());
        assert_eq!(count, 0);
    }

    struct Fixed(Vec<&'static str>);

    impl ColoringService for Fixed {
        fn assign(&self, _: &[&MultiPolygon<f64>]) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    fn district(number: &str) -> District {
        District {
            props: DistrictProps {
                state: "XX".into(),
                state_name: "Test".into(),
                number: number.into(),
                label_pt_lon: None,
                label_pt_lat: None,
                color_index: None,
                group: None,
            },
            geometry: Value::Null,
            shape: MultiPolygon(vec![]),
        }
    }

    #[test]
    fn attaches_indices_to_districts() {
        let mut districts = vec![district("01"), district("02"), district("03")];
        let count = assign_color_indices(&mut districts, &Fixed(vec!["blue", "red", "blue"])).unwrap();
        assert_eq!(count, 2);
        let indices: Vec<_> = districts.iter().map(|d| d.props.color_index).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let mut districts = vec![district("01"), district("02")];
        assert!(assign_color_indices(&mut districts, &Fixed(vec!["blue"])).is_err());
    }
}
