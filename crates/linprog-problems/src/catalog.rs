//! Named example instances of every exercise.

use linprog_solver::Model;

use crate::blending::{
    Crop, Diet, Farm, FarmPlanting, FeedProduct, Ingredient, PaintBlend, PaintComponent, PaintGrade, Planting, Ration,
};
use crate::coloring::FrequencyAssignment;
use crate::covering::{NurseSchedule, SetCover, Subset};
use crate::error::{CatalogError, ProblemError};
use crate::location::{FacilityLocation, Site};
use crate::network::{Assignment, FlowArc, MaxFlow, Transport};
use crate::selection::{CutProduct, CuttingPatterns, Knapsack, MaxClique};

/// A ready-to-build example model.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Unique name such as `knapsack-1`
    pub name: &'static str,
    pub exercise: &'static str,
    pub description: &'static str,
    pub build: fn() -> Result<Model, ProblemError>,
}

impl Scenario {
    pub fn model(&self) -> Result<Model, ProblemError> {
        (self.build)()
    }
}

/// Every scenario, grouped by exercise in a fixed order.
pub fn catalog() -> Vec<Scenario> {
    vec![
        scenario("ration-1", "ration", "Two feeds from cereal and meat stocks", || ration(20.0, 30.0, 10000.0)),
        scenario("ration-2", "ration", "Higher AMGS price", || ration(25.0, 30.0, 10000.0)),
        scenario("ration-3", "ration", "Scarce meat", || ration(20.0, 30.0, 7000.0)),
        scenario("diet-1", "diet", "Six foods, two vitamin minimums", || {
            diet([35.0, 30.0, 60.0, 50.0, 27.0, 22.0], [9.0, 19.0])
        }),
        scenario("diet-2", "diet", "Raised vitamin minimums", || {
            diet([35.0, 30.0, 60.0, 50.0, 27.0, 22.0], [15.0, 30.0])
        }),
        scenario("diet-3", "diet", "New prices and minimums", || {
            diet([45.0, 25.0, 65.0, 55.0, 25.0, 18.0], [10.0, 22.0])
        }),
        scenario("planting-1", "planting", "Three farms, three crops", || {
            planting([400.0, 650.0, 350.0], [1800.0, 2200.0, 950.0], [660.0, 880.0, 400.0], [5000.0, 4000.0, 1800.0])
        }),
        scenario("planting-2", "planting", "Smaller farms, new crop limits", || {
            planting([500.0, 400.0, 300.0], [1500.0, 1400.0, 1000.0], [800.0, 700.0, 500.0], [5000.0, 4000.0, 1800.0])
        }),
        scenario("planting-3", "planting", "Less water, new profits", || {
            planting([400.0, 650.0, 350.0], [1300.0, 1800.0, 900.0], [660.0, 880.0, 400.0], [4000.0, 5500.0, 2500.0])
        }),
        scenario("planting-farms-1", "planting", "Per-farm crop areas, equal share of each farm", || {
            let (farms, crops) =
                planting_data([400.0, 650.0, 350.0], [1800.0, 2200.0, 950.0], [660.0, 880.0, 400.0], [5000.0, 4000.0, 1800.0]);
            FarmPlanting { farms, crops, equal_share: true }.model()
        }),
        scenario("paint-1", "paint", "SR and SN paints from four components", || {
            paint(
                [1.5, 1.0, 4.0, 6.0],
                [0.3, 0.6, 1.0, 0.0],
                [0.7, 0.4, 0.0, 1.0],
                (1000.0, 250.0),
                [(0.25, 0.50), (0.20, 0.50)],
            )
        }),
        scenario("paint-2", "paint", "New costs and compositions", || {
            paint(
                [2.5, 1.8, 6.0, 7.5],
                [0.25, 0.55, 1.0, 0.0],
                [0.75, 0.45, 0.0, 1.0],
                (900.0, 300.0),
                [(0.25, 0.50), (0.20, 0.50)],
            )
        }),
        scenario("paint-3", "paint", "Stricter shares", || {
            paint(
                [1.5, 1.0, 4.0, 6.0],
                [0.4, 0.5, 1.0, 0.0],
                [0.6, 0.5, 0.0, 1.0],
                (1000.0, 250.0),
                [(0.30, 0.60), (0.25, 0.55)],
            )
        }),
        scenario("paint-4", "paint", "Adjusted costs and shares", || {
            paint(
                [2.0, 2.5, 3.5, 4.0],
                [0.2, 0.3, 1.0, 0.0],
                [0.8, 0.7, 0.0, 1.0],
                (1000.0, 250.0),
                [(0.35, 0.65), (0.30, 0.55)],
            )
        }),
        scenario("transport-1", "transport", "Balanced supply and demand", || {
            transport(
                [[8.0, 5.0, 6.0], [15.0, 10.0, 12.0], [3.0, 9.0, 10.0]],
                [120.0, 80.0, 80.0],
                [70.0, 60.0, 150.0],
            )
        }),
        scenario("transport-2", "transport", "Surplus supply", || {
            transport(
                [[7.0, 6.0, 8.0], [12.0, 9.0, 11.0], [4.0, 7.0, 9.0]],
                [50.0, 90.0, 190.0],
                [80.0, 70.0, 130.0],
            )
        }),
        scenario("transport-3", "transport", "Supply short of demand (infeasible)", || {
            transport(
                [[9.0, 7.0, 5.0], [14.0, 11.0, 13.0], [5.0, 8.0, 6.0]],
                [70.0, 90.0, 50.0],
                [90.0, 60.0, 140.0],
            )
        }),
        scenario("max-flow-1", "max-flow", "Four nodes", || {
            max_flow(&[("s", "a", 20.0), ("s", "b", 10.0), ("a", "b", 5.0), ("a", "t", 10.0), ("b", "t", 20.0)])
        }),
        scenario("max-flow-2", "max-flow", "Five nodes", || {
            max_flow(&[
                ("s", "a", 15.0),
                ("s", "b", 10.0),
                ("a", "c", 10.0),
                ("b", "c", 5.0),
                ("b", "t", 10.0),
                ("c", "t", 10.0),
            ])
        }),
        scenario("max-flow-3", "max-flow", "Seven nodes", || {
            max_flow(&[
                ("s", "a", 25.0),
                ("s", "b", 15.0),
                ("a", "c", 10.0),
                ("a", "d", 10.0),
                ("b", "d", 5.0),
                ("b", "e", 10.0),
                ("c", "t", 10.0),
                ("d", "t", 15.0),
                ("e", "t", 10.0),
            ])
        }),
        scenario("nurses-1", "nurses", "Weekly demand, five-day shifts", || {
            nurses([17.0, 13.0, 15.0, 19.0, 14.0, 16.0, 11.0])
        }),
        scenario("nurses-2", "nurses", "Midweek peak", || nurses([10.0, 12.0, 20.0, 25.0, 23.0, 18.0, 14.0])),
        scenario("nurses-3", "nurses", "Weekend peak", || nurses([8.0, 9.0, 11.0, 10.0, 12.0, 20.0, 22.0])),
        scenario("set-cover-1", "set-cover", "Five elements, four subsets", || {
            set_cover(
                &["1", "2", "3", "4", "5"],
                &[("A", &["1", "2", "3"]), ("B", &["2", "4"]), ("C", &["3", "4"]), ("D", &["4", "5"])],
            )
        }),
        scenario("set-cover-2", "set-cover", "Six elements, five subsets", || {
            set_cover(
                &["1", "2", "3", "4", "5", "6"],
                &[
                    ("X", &["1", "4"]),
                    ("Y", &["2", "5"]),
                    ("Z", &["3", "6"]),
                    ("W", &["1", "2", "3"]),
                    ("V", &["4", "5", "6"]),
                ],
            )
        }),
        scenario("set-cover-3", "set-cover", "Seven elements on a ring", || {
            set_cover(
                &["1", "2", "3", "4", "5", "6", "7"],
                &[
                    ("M", &["1", "2"]),
                    ("N", &["2", "3", "4"]),
                    ("O", &["4", "5"]),
                    ("P", &["5", "6"]),
                    ("Q", &["6", "7"]),
                    ("R", &["1", "7"]),
                ],
            )
        }),
        scenario("knapsack-1", "knapsack", "Three items", || {
            knapsack(&[60.0, 100.0, 120.0], &[10.0, 20.0, 30.0], 50.0)
        }),
        scenario("knapsack-2", "knapsack", "Five items", || {
            knapsack(&[90.0, 20.0, 60.0, 40.0, 30.0], &[15.0, 5.0, 10.0, 8.0, 6.0], 25.0)
        }),
        scenario("knapsack-3", "knapsack", "Six light items", || {
            knapsack(&[45.0, 60.0, 75.0, 40.0, 30.0, 20.0], &[3.0, 8.0, 7.0, 4.0, 2.0, 1.0], 15.0)
        }),
        scenario("knapsack-4", "knapsack", "Five heavy items", || {
            knapsack(&[80.0, 50.0, 60.0, 90.0, 20.0], &[10.0, 5.0, 7.0, 12.0, 3.0], 20.0)
        }),
        scenario("patterns-1", "patterns", "Small, medium and large pieces", || {
            patterns(&[("small", 2.0, 1.0), ("medium", 3.0, 2.0), ("large", 5.0, 4.0)], 1000.0)
        }),
        scenario("patterns-2", "patterns", "Three can sizes", || {
            patterns(&[("can_a", 4.0, 3.0), ("can_b", 5.0, 5.0), ("can_c", 7.0, 8.0)], 500.0)
        }),
        scenario("patterns-3", "patterns", "Three piece types", || {
            patterns(&[("type_x", 6.0, 5.0), ("type_y", 9.0, 7.0), ("type_z", 12.0, 10.0)], 720.0)
        }),
        scenario("facility-1", "facility", "Three sites, three customers", || {
            facility(
                &[
                    ("Local1", 100.0, &[20.0, 24.0, 18.0]),
                    ("Local2", 120.0, &[28.0, 20.0, 26.0]),
                    ("Local3", 90.0, &[22.0, 23.0, 20.0]),
                ],
                &["A", "B", "C"],
            )
        }),
        scenario("facility-2", "facility", "Four sites, three customers", || {
            facility(
                &[
                    ("LocalA", 80.0, &[15.0, 25.0, 22.0]),
                    ("LocalB", 110.0, &[20.0, 18.0, 21.0]),
                    ("LocalC", 95.0, &[22.0, 20.0, 24.0]),
                    ("LocalD", 70.0, &[17.0, 19.0, 20.0]),
                ],
                &["D", "E", "F"],
            )
        }),
        scenario("facility-3", "facility", "Four centers, four customers", || {
            facility(
                &[
                    ("Centro1", 130.0, &[30.0, 35.0, 28.0, 32.0]),
                    ("Centro2", 90.0, &[25.0, 30.0, 20.0, 24.0]),
                    ("Centro3", 120.0, &[32.0, 29.0, 27.0, 30.0]),
                    ("Centro4", 85.0, &[26.0, 27.0, 25.0, 28.0]),
                ],
                &["G", "H", "I", "J"],
            )
        }),
        scenario("frequency-1", "frequency", "Four-cycle", || {
            frequency(&["A", "B", "C", "D"], &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")], 4)
        }),
        scenario("frequency-2", "frequency", "Triangle with a tail", || {
            frequency(
                &["A", "B", "C", "D", "E", "F"],
                &[("A", "B"), ("A", "C"), ("B", "C"), ("B", "D"), ("C", "E"), ("D", "E"), ("E", "F")],
                5,
            )
        }),
        scenario("frequency-3", "frequency", "Five-cycle", || {
            frequency(&["P", "Q", "R", "S", "T"], &[("P", "Q"), ("Q", "R"), ("R", "S"), ("S", "T"), ("T", "P")], 4)
        }),
        scenario("clique-1", "clique", "Four vertices", || {
            clique(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D"), ("A", "C")])
        }),
        scenario("clique-2", "clique", "Six vertices", || {
            clique(
                &["P", "Q", "R", "S", "T", "U"],
                &[("P", "Q"), ("P", "R"), ("Q", "R"), ("Q", "S"), ("R", "S"), ("S", "T"), ("T", "U")],
            )
        }),
        scenario("clique-3", "clique", "Four-clique with a pendant", || {
            clique(
                &["X", "Y", "Z", "W", "V"],
                &[("X", "Y"), ("X", "Z"), ("X", "W"), ("Y", "Z"), ("Y", "W"), ("Z", "W"), ("W", "V")],
            )
        }),
        scenario("assignment-1", "assignment", "Three agents, three tasks", || {
            assignment(&[&[9.0, 2.0, 7.0], &[6.0, 4.0, 3.0], &[5.0, 8.0, 1.0]])
        }),
        scenario("assignment-2", "assignment", "Four agents, four tasks", || {
            assignment(&[&[9.0, 2.0, 7.0, 8.0], &[6.0, 4.0, 3.0, 7.0], &[5.0, 8.0, 1.0, 8.0], &[7.0, 6.0, 9.0, 4.0]])
        }),
    ]
}

/// Look up a scenario by name.
pub fn find(name: &str) -> Result<Scenario, CatalogError> {
    catalog()
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| CatalogError::UnknownScenario(name.to_string()))
}

fn scenario(
    name: &'static str,
    exercise: &'static str,
    description: &'static str,
    build: fn() -> Result<Model, ProblemError>,
) -> Scenario {
    Scenario {
        name,
        exercise,
        description,
        build,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn ration(amgs_price: f64, re_price: f64, meat: f64) -> Result<Model, ProblemError> {
    Ration {
        ingredients: vec![
            Ingredient { name: "cereal".into(), cost: 1.0, available: 30000.0 },
            Ingredient { name: "meat".into(), cost: 4.0, available: meat },
        ],
        products: vec![
            FeedProduct { name: "AMGS".into(), price: amgs_price, usage: vec![5.0, 1.0] },
            FeedProduct { name: "RE".into(), price: re_price, usage: vec![2.0, 4.0] },
        ],
    }
    .model()
}

fn diet(prices: [f64; 6], minimums: [f64; 2]) -> Result<Model, ProblemError> {
    Diet {
        prices: prices.to_vec(),
        contents: vec![vec![1.0, 0.0, 2.0, 2.0, 1.0, 2.0], vec![0.0, 1.0, 3.0, 1.0, 3.0, 2.0]],
        minimums: minimums.to_vec(),
    }
    .model()
}

fn planting(area: [f64; 3], water: [f64; 3], max_area: [f64; 3], profit: [f64; 3]) -> Result<Model, ProblemError> {
    let (farms, crops) = planting_data(area, water, max_area, profit);
    Planting { farms, crops }.model()
}

fn planting_data(area: [f64; 3], water: [f64; 3], max_area: [f64; 3], profit: [f64; 3]) -> (Vec<Farm>, Vec<Crop>) {
    let water_per_area = [5.5, 4.0, 3.5];
    let farms = (0..3)
        .map(|f| Farm { name: format!("farm{}", f + 1), area: area[f], water: water[f] })
        .collect();
    let crops = ["corn", "rice", "beans"]
        .iter()
        .enumerate()
        .map(|(c, name)| Crop {
            name: name.to_string(),
            max_area: max_area[c],
            water_per_area: water_per_area[c],
            profit_per_area: profit[c],
        })
        .collect();
    (farms, crops)
}

fn paint(
    cost: [f64; 4],
    sec: [f64; 4],
    cor: [f64; 4],
    (sr, sn): (f64, f64),
    shares: [(f64, f64); 2],
) -> Result<Model, ProblemError> {
    PaintBlend {
        components: ["SolA", "SolB", "SEC", "COR"]
            .iter()
            .enumerate()
            .map(|(k, name)| PaintComponent { name: name.to_string(), cost: cost[k], sec: sec[k], cor: cor[k] })
            .collect(),
        grades: [("SR", sr), ("SN", sn)]
            .iter()
            .zip(shares)
            .map(|(&(name, demand), (min_sec, min_cor))| PaintGrade { name: name.to_string(), demand, min_sec, min_cor })
            .collect(),
    }
    .model()
}

fn transport(costs: [[f64; 3]; 3], supply: [f64; 3], demand: [f64; 3]) -> Result<Model, ProblemError> {
    Transport {
        factories: strings(&["1", "2", "3"]),
        depots: strings(&["1", "2", "3"]),
        supply: supply.to_vec(),
        demand: demand.to_vec(),
        costs: costs.iter().map(|row| row.to_vec()).collect(),
    }
    .model()
}

fn max_flow(arcs: &[(&str, &str, f64)]) -> Result<Model, ProblemError> {
    MaxFlow {
        arcs: arcs.iter().map(|&(from, to, capacity)| FlowArc::new(from, to, capacity)).collect(),
        source: "s".into(),
        sink: "t".into(),
    }
    .model()
}

fn nurses(demand: [f64; 7]) -> Result<Model, ProblemError> {
    NurseSchedule {
        demand: demand.to_vec(),
        shift_length: 5,
    }
    .model()
}

fn set_cover(elements: &[&str], subsets: &[(&str, &[&str])]) -> Result<Model, ProblemError> {
    SetCover {
        elements: strings(elements),
        subsets: subsets.iter().map(|&(name, members)| Subset::new(name, members)).collect(),
    }
    .model()
}

fn knapsack(values: &[f64], weights: &[f64], capacity: f64) -> Result<Model, ProblemError> {
    Knapsack {
        values: values.to_vec(),
        weights: weights.to_vec(),
        capacity,
    }
    .model()
}

fn patterns(products: &[(&str, f64, f64)], material: f64) -> Result<Model, ProblemError> {
    CuttingPatterns {
        products: products
            .iter()
            .map(|&(name, material, profit)| CutProduct::new(name, material, profit))
            .collect(),
        material,
    }
    .model()
}

fn facility(sites: &[(&str, f64, &[f64])], customers: &[&str]) -> Result<Model, ProblemError> {
    FacilityLocation {
        sites: sites
            .iter()
            .map(|&(name, fixed_cost, service)| Site {
                name: name.to_string(),
                fixed_cost,
                service_costs: service.to_vec(),
            })
            .collect(),
        customers: strings(customers),
    }
    .model()
}

fn edge_list(edges: &[(&str, &str)]) -> Vec<(String, String)> {
    edges.iter().map(|(u, v)| (u.to_string(), v.to_string())).collect()
}

fn frequency(vertices: &[&str], edges: &[(&str, &str)], colors: usize) -> Result<Model, ProblemError> {
    FrequencyAssignment {
        vertices: strings(vertices),
        edges: edge_list(edges),
        colors,
    }
    .model()
}

fn clique(vertices: &[&str], edges: &[(&str, &str)]) -> Result<Model, ProblemError> {
    MaxClique {
        vertices: strings(vertices),
        edges: edge_list(edges),
    }
    .model()
}

fn assignment(costs: &[&[f64]]) -> Result<Model, ProblemError> {
    Assignment {
        costs: costs.iter().map(|row| row.to_vec()).collect(),
    }
    .model()
}
