//! CVRPLIB (TSPLIB95 CVRP subset) instance format.
//!
//! Header keys may appear in any order; `DIMENSION` and `CAPACITY` are
//! required, `TYPE` must be `CVRP` and `EDGE_WEIGHT_TYPE` must be `EUC_2D`
//! when present. File ids are 1-based and become node indices `id - 1`.
//! Without a `DEPOT_SECTION` the first node is the depot.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::ReadError;
use crate::models::{Instance, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Coords,
    Demands,
    Depots,
}

#[derive(Default)]
struct CvrplibReader {
    name: Option<String>,
    dimension: Option<usize>,
    capacity: Option<u32>,
    coords: BTreeMap<usize, (f64, f64)>,
    demands: BTreeMap<usize, u32>,
    depots: Vec<usize>,
}

/// Parses a CVRPLIB instance.
///
/// # Examples
///
/// ```
/// use u_cvrp::io::parse_instance;
///
/// let text = "\
/// NAME : tiny
/// TYPE : CVRP
/// DIMENSION : 3
/// EDGE_WEIGHT_TYPE : EUC_2D
/// CAPACITY : 10
/// NODE_COORD_SECTION
/// 1 0 0
/// 2 3 4
/// 3 6 8
/// DEMAND_SECTION
/// 1 0
/// 2 4
/// 3 5
/// DEPOT_SECTION
/// 1
/// -1
/// EOF
/// ";
/// let instance = parse_instance(text).unwrap();
/// assert_eq!(instance.name(), Some("tiny"));
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.capacity(), 10);
/// assert_eq!(instance.demand(2), 5);
/// ```
pub fn parse_instance(text: &str) -> Result<Instance, ReadError> {
    let mut reader = CvrplibReader::default();
    let mut section = Section::Header;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line == "EOF" {
            break;
        }
        if let Some(next) = section_keyword(line) {
            section = next;
            continue;
        }

        match section {
            Section::Header => reader.read_key_value(line, line_no)?,
            Section::Coords => reader.read_coord(line, line_no)?,
            Section::Demands => reader.read_demand(line, line_no)?,
            Section::Depots => {
                if reader.read_depot(line, line_no)? {
                    section = Section::Header;
                }
            }
        }
    }

    reader.into_instance()
}

fn section_keyword(line: &str) -> Option<Section> {
    match line {
        "NODE_COORD_SECTION" => Some(Section::Coords),
        "DEMAND_SECTION" => Some(Section::Demands),
        "DEPOT_SECTION" => Some(Section::Depots),
        _ => None,
    }
}

impl CvrplibReader {
    fn read_key_value(&mut self, line: &str, line_no: usize) -> Result<(), ReadError> {
        let (key, value) = line.split_once(':').ok_or_else(|| {
            ReadError::malformed(
                line_no,
                format!("expected colon separated string, got: '{line}'"),
            )
        })?;
        let value = value.trim();

        match key.trim() {
            "NAME" => self.name = Some(value.to_string()),
            "TYPE" if value != "CVRP" => {
                return Err(ReadError::UnsupportedValue {
                    key: "TYPE",
                    value: value.to_string(),
                })
            }
            "EDGE_WEIGHT_TYPE" if value != "EUC_2D" => {
                return Err(ReadError::UnsupportedValue {
                    key: "EDGE_WEIGHT_TYPE",
                    value: value.to_string(),
                })
            }
            "DIMENSION" => self.dimension = Some(parse_field(value, line_no, "DIMENSION")?),
            "CAPACITY" => self.capacity = Some(parse_field(value, line_no, "CAPACITY")?),
            // COMMENT and other informational keys
            _ => {}
        }
        Ok(())
    }

    fn read_coord(&mut self, line: &str, line_no: usize) -> Result<(), ReadError> {
        let data: Vec<&str> = line.split_whitespace().collect();
        if data.len() != 3 {
            return Err(ReadError::malformed(line_no, format!("unexpected coord data: '{line}'")));
        }
        let id = parse_id(data[0], line_no)?;
        let x = parse_field(data[1], line_no, "x coordinate")?;
        let y = parse_field(data[2], line_no, "y coordinate")?;
        if self.coords.insert(id, (x, y)).is_some() {
            return Err(ReadError::malformed(line_no, format!("duplicate coordinates for id {id}")));
        }
        Ok(())
    }

    fn read_demand(&mut self, line: &str, line_no: usize) -> Result<(), ReadError> {
        let data: Vec<&str> = line.split_whitespace().collect();
        if data.len() != 2 {
            return Err(ReadError::malformed(line_no, format!("unexpected demand data: '{line}'")));
        }
        let id = parse_id(data[0], line_no)?;
        let demand = parse_field(data[1], line_no, "demand")?;
        if self.demands.insert(id, demand).is_some() {
            return Err(ReadError::malformed(line_no, format!("duplicate demand for id {id}")));
        }
        Ok(())
    }

    /// Returns `true` on the `-1` terminator.
    fn read_depot(&mut self, line: &str, line_no: usize) -> Result<bool, ReadError> {
        let value: i64 = parse_field(line, line_no, "depot id")?;
        if value == -1 {
            return Ok(true);
        }
        let id = usize::try_from(value)
            .ok()
            .filter(|&id| id >= 1)
            .ok_or_else(|| ReadError::malformed(line_no, format!("invalid depot id: '{line}'")))?;
        self.depots.push(id);
        Ok(false)
    }

    fn into_instance(self) -> Result<Instance, ReadError> {
        let dimension = self.dimension.ok_or(ReadError::MissingKey("DIMENSION"))?;
        let capacity = self.capacity.ok_or(ReadError::MissingKey("CAPACITY"))?;

        if self.depots.len() > 1 {
            return Err(ReadError::UnsupportedValue {
                key: "DEPOT_SECTION",
                value: format!("{} depots", self.depots.len()),
            });
        }
        let depot_id = self.depots.first().copied().unwrap_or(1);

        if let Some(&id) = self
            .coords
            .keys()
            .chain(self.demands.keys())
            .find(|&&id| id > dimension)
        {
            return Err(ReadError::Incomplete(format!("id {id} exceeds DIMENSION {dimension}")));
        }
        // Ids are unique and at most DIMENSION past this point.
        if self.coords.len() < dimension {
            return Err(ReadError::Incomplete(format!(
                "found {} coordinates, DIMENSION is {dimension}",
                self.coords.len()
            )));
        }

        let mut nodes = Vec::with_capacity(dimension);
        for id in 1..=dimension {
            let &(x, y) = self.coords.get(&id).ok_or_else(|| {
                ReadError::Incomplete(format!("cannot find coordinates for id {id}"))
            })?;
            let demand = match self.demands.get(&id) {
                Some(&demand) => demand,
                None if id == depot_id => 0,
                None => {
                    return Err(ReadError::Incomplete(format!("cannot find demand for id {id}")))
                }
            };
            nodes.push(Node::new(x, y, demand));
        }

        let instance = Instance::new(nodes, capacity, depot_id - 1)?;
        Ok(match self.name {
            Some(name) => instance.with_name(name),
            None => instance,
        })
    }
}

fn parse_id(data: &str, line_no: usize) -> Result<usize, ReadError> {
    match data.parse::<usize>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ReadError::malformed(line_no, format!("invalid node id: '{data}'"))),
    }
}

fn parse_field<T>(data: &str, line_no: usize, what: &str) -> Result<T, ReadError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    data.trim().parse().map_err(|err| {
        ReadError::malformed(line_no, format!("cannot parse {what}: '{data}' ({err})"))
    })
}

/// Formats an instance as CVRPLIB text, readable by [`parse_instance`].
pub fn format_instance(instance: &Instance) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_instance(instance, &mut out);
    out
}

fn write_instance(instance: &Instance, out: &mut String) -> std::fmt::Result {
    writeln!(out, "NAME : {}", instance.name().unwrap_or("unnamed"))?;
    writeln!(out, "TYPE : CVRP")?;
    writeln!(out, "DIMENSION : {}", instance.num_nodes())?;
    writeln!(out, "EDGE_WEIGHT_TYPE : EUC_2D")?;
    writeln!(out, "CAPACITY : {}", instance.capacity())?;
    writeln!(out, "NODE_COORD_SECTION")?;
    for (i, node) in instance.nodes().iter().enumerate() {
        writeln!(out, "{} {} {}", i + 1, node.x(), node.y())?;
    }
    writeln!(out, "DEMAND_SECTION")?;
    for i in 0..instance.num_nodes() {
        writeln!(out, "{} {}", i + 1, instance.demand(i))?;
    }
    writeln!(out, "DEPOT_SECTION")?;
    writeln!(out, "{}", instance.depot() + 1)?;
    writeln!(out, "-1")?;
    writeln!(out, "EOF")
}
