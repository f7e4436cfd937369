pub mod util;

#[cfg(test)]
mod primitives;
#[cfg(test)]
mod decompose;
#[cfg(test)]
mod triangulate;
#[cfg(test)]
mod negative;
#[cfg(test)]
mod regression;
