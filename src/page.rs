use std::sync::OnceLock;

static PAGE_SIZE: OnceLock<usize> = OnceLock::new();

/// Returns the OS virtual memory page size in bytes.
///
/// Queried from the OS at most once per process and cached; the value is
/// stable for the remainder of the process.
pub fn page_size() -> usize {
  *PAGE_SIZE.get_or_init(|| unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_page_size() {
    let size = page_size();

    assert!(size > 0);
    assert!(size.is_power_of_two());
    assert_eq!(size, page_size());
  }
}
