use crate::domain::CatalogCandidate;

/// Elige el candidato más popular.
///
/// La relevancia que devuelve el catálogo no basta: buscar por nombre suele
/// traer homónimos, y el más popular es casi siempre el canónico.
///
/// - Un solo recorrido lineal con el máximo acumulado.
/// - Empates: gana el primero en el orden recibido.
/// - Lista vacía: `None` (no es un error).
pub fn select_most_popular(candidates: &[CatalogCandidate]) -> Option<&CatalogCandidate> {
  let mut best: Option<&CatalogCandidate> = None;

  for candidate in candidates {
    match best {
      Some(current) if candidate.popularity <= current.popularity => {}
      _ => best = Some(candidate),
    }
  }

  best
}
