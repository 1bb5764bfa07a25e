//! moneybook-ffi
//!
//! C ABI for native front ends: the amount keypad and monthly figures.
//! Strings handed out by this library must be released with
//! [`moneybook_string_free`].

use std::{
    ffi::{CStr, CString},
    fmt::Display,
    os::raw::{c_char, c_double, c_int},
    ptr,
};

use moneybook_core::{
    monthly_totals, parse_keys, Calculator, CalculatorFault, CoreError,
};
use moneybook_domain::YearMonth;

/// Opaque calculator session owned by the caller.
pub struct CalculatorHandle {
    inner: Calculator,
}

impl CalculatorHandle {
    fn new(calculator: Calculator) -> *mut Self {
        Box::into_raw(Box::new(Self { inner: calculator }))
    }
}

#[repr(C)]
pub struct FfiMonthlyTotals {
    pub year: c_int,
    pub month: c_int,
    pub income: c_double,
    pub expense: c_double,
    pub net: c_double,
    pub uncategorized: c_int,
}

#[no_mangle]
pub extern "C" fn moneybook_calculator_new() -> *mut CalculatorHandle {
    CalculatorHandle::new(Calculator::new())
}

/// Session seeded with an existing entry amount.
#[no_mangle]
pub extern "C" fn moneybook_calculator_with_amount(amount: c_double) -> *mut CalculatorHandle {
    CalculatorHandle::new(Calculator::with_amount(amount))
}

#[no_mangle]
pub extern "C" fn moneybook_calculator_free(handle: *mut CalculatorHandle) {
    if handle.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(handle));
    }
}

/// Presses one or more keys given by their keypad labels (`"7"`, `"00"`,
/// `"<-"`, `"12+8="`). No key is pressed when any label is unknown.
#[no_mangle]
pub extern "C" fn moneybook_calculator_press(
    handle: *mut CalculatorHandle,
    keys: *const c_char,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() {
        unsafe {
            write_error(out_error, "calculator handle is null");
        }
        return 1;
    }
    let labels = match unsafe { c_string_argument(keys) } {
        Ok(value) => value,
        Err(message) => {
            unsafe {
                write_error(out_error, message);
            }
            return 2;
        }
    };
    let parsed = match parse_keys(&labels) {
        Ok(parsed) => parsed,
        Err(err) => {
            unsafe {
                write_error(out_error, err);
            }
            return 3;
        }
    };

    let calculator = unsafe { &mut (*handle).inner };
    calculator.press_all(parsed);
    0
}

/// Current display string, or null for a null handle.
#[no_mangle]
pub extern "C" fn moneybook_calculator_display(handle: *const CalculatorHandle) -> *mut c_char {
    if handle.is_null() {
        return ptr::null_mut();
    }
    let calculator = unsafe { &(*handle).inner };
    into_c_string(calculator.display())
}

/// The committed amount the entry form should store.
#[no_mangle]
pub extern "C" fn moneybook_calculator_amount(handle: *const CalculatorHandle) -> c_double {
    if handle.is_null() {
        return 0.0;
    }
    unsafe { (*handle).inner.committed_amount() }
}

/// `0` when healthy, `1` after a division by zero, `2` after an overflow.
#[no_mangle]
pub extern "C" fn moneybook_calculator_fault(handle: *const CalculatorHandle) -> c_int {
    if handle.is_null() {
        return 0;
    }
    match unsafe { (*handle).inner.fault() } {
        None => 0,
        Some(CalculatorFault::DivisionByZero) => 1,
        Some(CalculatorFault::Overflow) => 2,
    }
}

#[no_mangle]
pub extern "C" fn moneybook_calculator_clear(handle: *mut CalculatorHandle) {
    if handle.is_null() {
        return;
    }
    unsafe {
        (*handle).inner = Calculator::new();
    }
}

/// Income, expense and net for one month of a CSV export.
#[no_mangle]
pub extern "C" fn moneybook_monthly_totals(
    csv: *const c_char,
    year: c_int,
    month: c_int,
    out_totals: *mut FfiMonthlyTotals,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if out_totals.is_null() {
        unsafe {
            write_error(out_error, "output totals is null");
        }
        return 1;
    }
    let content = match unsafe { c_string_argument(csv) } {
        Ok(value) => value,
        Err(message) => {
            unsafe {
                write_error(out_error, message);
            }
            return 2;
        }
    };
    let Some(target) = u32::try_from(month)
        .ok()
        .and_then(|month| YearMonth::new(year, month))
    else {
        unsafe {
            write_error(out_error, CoreError::InvalidMonth(format!("{year}-{month}")));
        }
        return 3;
    };
    let book = match moneybook_csv::parse_book(&content) {
        Ok(book) => book,
        Err(err) => {
            unsafe {
                write_error(out_error, err);
            }
            return 4;
        }
    };

    let totals = monthly_totals(&book.entries, target);
    unsafe {
        (*out_totals).year = year;
        (*out_totals).month = month;
        (*out_totals).income = totals.income;
        (*out_totals).expense = totals.expense;
        (*out_totals).net = totals.net;
        (*out_totals).uncategorized = totals.uncategorized as c_int;
    }
    0
}

#[no_mangle]
pub extern "C" fn moneybook_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(value));
    }
}

fn clear_error(out_error: *mut *mut c_char) {
    if out_error.is_null() {
        return;
    }
    unsafe {
        *out_error = ptr::null_mut();
    }
}

unsafe fn write_error(out_error: *mut *mut c_char, message: impl Display) {
    if out_error.is_null() {
        return;
    }
    *out_error = into_c_string(message.to_string());
}

fn into_c_string(value: String) -> *mut c_char {
    CString::new(value)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

unsafe fn c_string_argument(ptr: *const c_char) -> Result<String, String> {
    if ptr.is_null() {
        return Err("null string pointer received".into());
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(|s| s.to_string())
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take_string(value: *mut c_char) -> String {
        assert!(!value.is_null());
        let text = unsafe { CStr::from_ptr(value) }.to_str().unwrap().to_string();
        moneybook_string_free(value);
        text
    }

    fn press(handle: *mut CalculatorHandle, keys: &str) -> c_int {
        let keys = CString::new(keys).unwrap();
        moneybook_calculator_press(handle, keys.as_ptr(), ptr::null_mut())
    }

    #[test]
    fn calculator_session_divides() {
        let handle = moneybook_calculator_new();
        assert_eq!(press(handle, "7/8="), 0);
        assert_eq!(take_string(moneybook_calculator_display(handle)), "0.875");
        assert_eq!(moneybook_calculator_amount(handle), 0.875);

        moneybook_calculator_clear(handle);
        assert_eq!(take_string(moneybook_calculator_display(handle)), "0");
        moneybook_calculator_free(handle);
    }

    #[test]
    fn unknown_key_sets_error() {
        let handle = moneybook_calculator_with_amount(12.5);
        let keys = CString::new("1?").unwrap();
        let mut error: *mut c_char = ptr::null_mut();

        let code = moneybook_calculator_press(handle, keys.as_ptr(), &mut error);

        assert_eq!(code, 3);
        assert!(take_string(error).contains('?'));
        assert_eq!(take_string(moneybook_calculator_display(handle)), "12.5");
        moneybook_calculator_free(handle);
    }

    #[test]
    fn division_by_zero_is_reported_as_fault() {
        let handle = moneybook_calculator_new();
        press(handle, "5/0=");
        assert_eq!(moneybook_calculator_fault(handle), 1);
        assert_eq!(moneybook_calculator_amount(handle), 0.0);
        moneybook_calculator_free(handle);
    }

    #[test]
    fn null_handles_are_tolerated() {
        moneybook_calculator_free(ptr::null_mut());
        moneybook_calculator_clear(ptr::null_mut());
        assert!(moneybook_calculator_display(ptr::null()).is_null());
        assert_eq!(press(ptr::null_mut(), "1"), 1);
    }

    #[test]
    fn monthly_totals_from_csv() {
        let csv = CString::new(
            "group_title,group_created,category_title,category_isExpense,title,amount,timestamp,note\n\
             Home,2024-01-01T00:00:00Z,food,1,Lunch,-12,2024-03-02T03:00:00Z,\n\
             Home,2024-01-01T00:00:00Z,salary,0,Pay,3000,2024-03-25T00:00:00Z,\n\
             Home,2024-01-01T00:00:00Z,food,1,Feb lunch,-9,2024-02-02T03:00:00Z,\n",
        )
        .unwrap();
        let mut totals = FfiMonthlyTotals {
            year: 0,
            month: 0,
            income: 0.0,
            expense: 0.0,
            net: 0.0,
            uncategorized: 0,
        };
        let mut error: *mut c_char = ptr::null_mut();

        let code = moneybook_monthly_totals(csv.as_ptr(), 2024, 3, &mut totals, &mut error);

        assert_eq!(code, 0);
        assert!(error.is_null());
        assert_eq!(totals.income, 3000.0);
        assert_eq!(totals.expense, 12.0);
        assert_eq!(totals.net, 2988.0);

        let code = moneybook_monthly_totals(csv.as_ptr(), 2024, 13, &mut totals, &mut error);
        assert_eq!(code, 3);
        assert!(take_string(error).contains("2024-13"));
    }
}
