use std::collections::BTreeMap;

use dag_viewer::config::settings::ViewerConfig;
use dag_viewer::graph_utils::graph::DiGraph;
use dag_viewer::layout::layered::LayeredLayout;
use dag_viewer::scene::visual_scene::VisualScene;
use proptest::prelude::*;

const XS: f32 = 70.0;
const YS: f32 = 90.0;

// Random DAG: edges only run from a lower to a higher label, while the
// insertion order is an arbitrary permutation of the labels.
fn dag_strategy() -> impl Strategy<Value = DiGraph<u32>> {
    (1u32..24)
        .prop_flat_map(|n| {
            let order = Just((0..n).collect::<Vec<u32>>()).prop_shuffle();
            let pairs = prop::collection::vec((0..n, 0..n), 0..(n as usize * 3));
            (order, pairs)
        })
        .prop_map(|(order, pairs)| {
            let mut g = DiGraph::new();
            for n in order {
                g.add_node(n);
            }
            for (a, b) in pairs {
                if a < b {
                    g.add_edge(&a, &b).expect("both labels were inserted");
                }
            }
            g
        })
}

fn generation_map(g: &DiGraph<u32>) -> BTreeMap<u32, usize> {
    let mut out = BTreeMap::new();
    for (i, generation) in g.topological_generations().expect("acyclic by construction").iter().enumerate() {
        for n in generation {
            out.insert(*n, i);
        }
    }
    out
}

proptest! {
    #[test]
    fn generation_is_one_past_deepest_predecessor(g in dag_strategy()) {
        let gens = generation_map(&g);
        prop_assert_eq!(gens.len(), g.node_count());
        for n in g.nodes() {
            let expected = g.predecessors(n).map(|p| gens[p] + 1).max().unwrap_or(0);
            prop_assert_eq!(gens[n], expected, "node {}", n);
        }
    }

    #[test]
    fn rows_and_columns_follow_spacing(g in dag_strategy()) {
        let layout = LayeredLayout::new(XS, YS).compute(&g).expect("acyclic");
        let order: BTreeMap<u32, usize> = g.nodes().enumerate().map(|(i, n)| (*n, i)).collect();
        for (gi, generation) in layout.generations.iter().enumerate() {
            for (i, n) in generation.iter().enumerate() {
                let p = layout.position(n).expect("every node placed");
                prop_assert_eq!(p.x, i as f32 * XS);
                prop_assert_eq!(p.y, gi as f32 * YS);
            }
            // Ties keep the graph's enumeration order
            for pair in generation.windows(2) {
                prop_assert!(order[&pair[0]] < order[&pair[1]]);
            }
        }
    }

    #[test]
    fn scene_positions_reproduce_generations(g in dag_strategy()) {
        let cfg = ViewerConfig { x_spacing: Some(XS), y_spacing: Some(YS), ..Default::default() };
        let direct = g.topological_generations().expect("acyclic");
        let mut scene = VisualScene::new(&cfg);
        scene.set_graph(g).expect("acyclic");

        // Group node centers by row, then order each row by x
        let mut rows: BTreeMap<i64, Vec<(f32, u32)>> = BTreeMap::new();
        for vn in scene.visual_nodes() {
            let c = vn.center();
            rows.entry((c.y / YS).round() as i64).or_default().push((c.x, *vn.node()));
        }
        let rebuilt: Vec<Vec<u32>> = rows
            .into_values()
            .map(|mut row| {
                row.sort_by(|a, b| a.0.total_cmp(&b.0));
                row.into_iter().map(|(_, n)| n).collect()
            })
            .collect();
        prop_assert_eq!(rebuilt, direct);
    }
}
