//! Driver transaction tests against a scripted link

mod mock;

use mock::{MockClock, MockLink};
use rn2483::device::Rn2483;
use rn2483::protocol::request::RequestError;
use rn2483::protocol::response::{ErrorKind, SuccessKind};
use rn2483::types::{DataRate, SpreadingFactor, Uplink};

fn driver(link: MockLink) -> Rn2483<MockLink, MockClock> {
    Rn2483::new(link, MockClock::new())
}

fn joined_driver(link: &mut MockLink) {
    link.push_line("ok"); // deveui
    link.push_line("ok"); // appeui
    link.push_line("ok"); // appkey
    link.push_line("ok"); // join queued
    link.push_line("accepted");
}

const DEV_EUI: [u8; 8] = [0x00, 0x04, 0xA3, 0x0B, 0x00, 0x1A, 0x55, 0xED];
const APP_EUI: [u8; 8] = [0x01; 8];
const APP_KEY: [u8; 16] = [0x2B; 16];

#[test]
fn set_command_frames_one_line() {
    let mut link = MockLink::new();
    link.push_line("ok");
    let mut modem = driver(link);

    modem.set_data_rate(DataRate::Dr3).unwrap();
    assert_eq!(modem.last_success(), Some(SuccessKind::Ok));

    let (link, _) = modem.free();
    assert_eq!(link.written(), b"mac set dr 3\r\n");
}

#[test]
fn get_command_returns_the_value_line() {
    let mut link = MockLink::new();
    link.push_line("868");
    let mut modem = driver(link);

    assert_eq!(modem.band().unwrap(), 868);
    // a bare value is neither a success token nor an error
    assert_eq!(modem.last_success(), None);
    assert_eq!(modem.last_error(), None);

    let (link, _) = modem.free();
    assert_eq!(link.written(), b"mac get band\r\n");
}

#[test]
fn error_token_fails_the_transaction() {
    let mut link = MockLink::new();
    link.push_line("invalid_param");
    let mut modem = driver(link);

    assert_eq!(
        modem.set_adr(true),
        Err(RequestError::Failed(ErrorKind::InvalidParam))
    );
    assert_eq!(modem.last_error(), Some(ErrorKind::InvalidParam));
    assert_eq!(modem.last_success(), None);
}

#[test]
fn unparseable_value_is_an_invalid_parameter() {
    let mut link = MockLink::new();
    link.push_line("not-a-number");
    let mut modem = driver(link);

    assert_eq!(
        modem.band(),
        Err(RequestError::Failed(ErrorKind::InvalidParam))
    );
}

#[test]
fn default_timeout_gives_up_after_200_ms() {
    let mut link = MockLink::new();
    link.push_line_at(300, "4");
    let mut modem = driver(link);

    assert_eq!(
        modem.data_rate(),
        Err(RequestError::Failed(ErrorKind::Timeout))
    );
    assert_eq!(modem.last_error(), Some(ErrorKind::Timeout));
}

#[test]
fn save_waits_out_the_eeprom_write() {
    let mut link = MockLink::new();
    link.push_line_at(300, "ok");
    let mut modem = driver(link);

    modem.save().unwrap();
    assert_eq!(modem.last_success(), Some(SuccessKind::Ok));

    let (link, _) = modem.free();
    assert_eq!(link.written(), b"mac save\r\n");
}

#[test]
fn join_sets_keys_and_waits_for_acceptance() {
    let mut link = MockLink::new();
    joined_driver(&mut link);
    let mut modem = driver(link);

    modem.join_otaa(&DEV_EUI, &APP_EUI, &APP_KEY).unwrap();
    assert!(modem.joined());
    assert_eq!(modem.last_success(), Some(SuccessKind::Accepted));

    let (link, _) = modem.free();
    let written = link.written_str();
    assert!(written.contains("mac set deveui 0004A30B001A55ED\r\n"));
    assert!(written.contains("mac set appeui 0101010101010101\r\n"));
    assert!(written.contains("mac set appkey 2B2B2B2B2B2B2B2B2B2B2B2B2B2B2B2B\r\n"));
    assert!(written.ends_with("mac join otaa\r\n"));
}

#[test]
fn join_denial_is_reported() {
    let mut link = MockLink::new();
    link.push_line("ok");
    link.push_line("denied");
    let mut modem = driver(link);

    assert_eq!(
        modem.join(),
        Err(RequestError::Failed(ErrorKind::JoinDenied))
    );
    assert_eq!(modem.last_error(), Some(ErrorKind::JoinDenied));
    assert!(!modem.joined());
}

#[test]
fn join_without_acceptance_records_the_denial() {
    let mut link = MockLink::new();
    link.push_line("ok");
    link.push_line("ok"); // exchange never concludes with `accepted`
    let mut modem = driver(link);

    assert_eq!(
        modem.join(),
        Err(RequestError::Failed(ErrorKind::JoinDenied))
    );
    assert_eq!(modem.last_error(), Some(ErrorKind::JoinDenied));
    assert!(!modem.joined());
}

#[test]
fn join_with_hardware_eui_reads_it_first() {
    let mut link = MockLink::new();
    link.push_line("0004A30B001A55ED");
    joined_driver(&mut link);
    let mut modem = driver(link);

    modem.join_otaa_with_hw_eui(&APP_EUI, &APP_KEY).unwrap();
    assert!(modem.joined());

    let (link, _) = modem.free();
    let written = link.written_str();
    assert!(written.starts_with("sys get hweui\r\n"));
    assert!(written.contains("mac set deveui 0004A30B001A55ED\r\n"));
}

#[test]
fn unconfirmed_uplink_frames_port_and_hex_payload() {
    let mut link = MockLink::new();
    joined_driver(&mut link);
    link.push_line("ok");
    link.push_line("mac_tx_ok");
    let mut modem = driver(link);

    modem.join_otaa(&DEV_EUI, &APP_EUI, &APP_KEY).unwrap();
    modem.send_unconfirmed(1, &[0x01, 0x02, 0x03]).unwrap();
    assert_eq!(modem.last_success(), Some(SuccessKind::MacTxOk));
    assert!(modem.downlink().is_empty());

    let (link, _) = modem.free();
    assert!(link.written_str().ends_with("mac tx uncnf 1 010203\r\n"));
}

#[test]
fn confirmed_uplink_stores_the_downlink() {
    let mut link = MockLink::new();
    joined_driver(&mut link);
    link.push_line("ok");
    link.push_line("mac_rx 2 0A0B");
    let mut modem = driver(link);

    modem.join_otaa(&DEV_EUI, &APP_EUI, &APP_KEY).unwrap();
    modem.send(Uplink::Confirmed, 2, &[0xFF]).unwrap();

    assert_eq!(modem.last_success(), Some(SuccessKind::Rx));
    assert_eq!(modem.downlink().port(), Some(2));
    let payload = modem.downlink().payload().unwrap().unwrap();
    assert_eq!(payload.as_slice(), &[0x0A, 0x0B]);

    let (link, _) = modem.free();
    assert!(link.written_str().ends_with("mac tx cnf 2 FF\r\n"));
}

#[test]
fn failed_uplink_clears_the_stored_downlink() {
    let mut link = MockLink::new();
    joined_driver(&mut link);
    link.push_line("ok");
    link.push_line("mac_rx 2 0A0B");
    link.push_line("ok"); // second uplink queued; no transmit result follows
    let mut modem = driver(link);

    modem.join_otaa(&DEV_EUI, &APP_EUI, &APP_KEY).unwrap();
    modem.send(Uplink::Confirmed, 2, &[0xFF]).unwrap();
    assert_eq!(modem.downlink().port(), Some(2));

    assert_eq!(
        modem.send(Uplink::Confirmed, 2, &[0xFF]),
        Err(RequestError::Failed(ErrorKind::Timeout))
    );
    assert!(modem.downlink().is_empty());
}

#[test]
fn silent_second_wait_still_succeeds_unconfirmed() {
    let mut link = MockLink::new();
    joined_driver(&mut link);
    link.push_line("ok"); // queued; no transmit confirmation follows
    let mut modem = driver(link);

    modem.join_otaa(&DEV_EUI, &APP_EUI, &APP_KEY).unwrap();
    modem.send_unconfirmed(1, &[0x42]).unwrap();
    assert_eq!(modem.last_error(), None);
    assert!(modem.downlink().is_empty());
}

#[test]
fn silent_second_wait_fails_a_confirmed_uplink() {
    let mut link = MockLink::new();
    joined_driver(&mut link);
    link.push_line("ok");
    let mut modem = driver(link);

    modem.join_otaa(&DEV_EUI, &APP_EUI, &APP_KEY).unwrap();
    assert_eq!(
        modem.send(Uplink::Confirmed, 1, &[0x42]),
        Err(RequestError::Failed(ErrorKind::Timeout))
    );
}

#[test]
fn uplink_without_join_writes_nothing() {
    let mut link = MockLink::new();
    link.push_line("ok");
    let mut modem = driver(link);

    assert_eq!(
        modem.send_unconfirmed(1, &[0x42]),
        Err(RequestError::Failed(ErrorKind::NotJoined))
    );
    assert_eq!(modem.last_error(), Some(ErrorKind::NotJoined));

    let (link, _) = modem.free();
    assert!(link.written().is_empty());
}

#[test]
fn oversized_uplink_payload_is_rejected_before_framing() {
    let mut link = MockLink::new();
    joined_driver(&mut link);
    let mut modem = driver(link);

    modem.join_otaa(&DEV_EUI, &APP_EUI, &APP_KEY).unwrap();
    assert_eq!(
        modem.send_unconfirmed(1, &[0u8; 65]),
        Err(RequestError::Failed(ErrorKind::InvalidDataLen))
    );

    let (link, _) = modem.free();
    assert!(!link.written_str().contains("mac tx"));
}

#[test]
fn silence_after_sleep_means_asleep() {
    let mut link = MockLink::new();
    link.push_line_at(250, "ok"); // wake acknowledgement
    link.push_line_at(260, "868");
    let mut modem = driver(link);

    assert!(modem.sleep(60000).unwrap());
    assert!(modem.is_asleep());

    // the next transaction wakes the modem transparently
    assert_eq!(modem.band().unwrap(), 868);
    assert!(!modem.is_asleep());

    let (link, _) = modem.free();
    assert_eq!(link.bauds(), &[300, 57_600]);
    assert_eq!(
        link.written(),
        b"sys sleep 60000\r\n\x00\x55mac get band\r\n".as_slice()
    );
}

#[test]
fn response_to_sleep_means_still_awake() {
    let mut link = MockLink::new();
    link.push_line("ok");
    let mut modem = driver(link);

    assert!(!modem.sleep(1000).unwrap());
    assert!(!modem.is_asleep());

    let (link, _) = modem.free();
    assert_eq!(link.bauds(), &[] as &[u32]);
}

#[test]
fn sys_version_and_nvm_access() {
    let mut link = MockLink::new();
    link.push_line("RN2483 1.0.1 Dec 15 2015 09:38:09");
    link.push_line("4F");
    link.push_line("ok");
    let mut modem = driver(link);

    let banner = modem.sys().version().unwrap();
    assert!(banner.as_str().starts_with("RN2483"));
    assert_eq!(modem.sys().nvm_get(0x3AB).unwrap(), 0x4F);
    modem.sys().nvm_set(0x300, 0xA5).unwrap();

    let (link, _) = modem.free();
    let written = link.written_str();
    assert!(written.starts_with("sys get ver\r\n"));
    assert!(written.contains("sys get nvm 3AB\r\n"));
    assert!(written.ends_with("sys set nvm 300 A5\r\n"));
}

#[test]
fn radio_parameters_parse_their_keywords() {
    let mut link = MockLink::new();
    link.push_line("sf12");
    link.push_line("on");
    link.push_line("34");
    link.push_line("ok");
    let mut modem = driver(link);

    assert_eq!(
        modem.radio().spreading_factor().unwrap(),
        SpreadingFactor::Sf12
    );
    assert!(modem.radio().crc().unwrap());
    assert_eq!(modem.radio().sync_word().unwrap(), 0x34);
    modem.radio().set_output_power(14).unwrap();

    let (link, _) = modem.free();
    let written = link.written_str();
    assert!(written.starts_with("radio get sf\r\n"));
    assert!(written.contains("radio get crc\r\n"));
    assert!(written.contains("radio get sync\r\n"));
    assert!(written.ends_with("radio set pwr 14\r\n"));
}
